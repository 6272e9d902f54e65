use crate::services::role_contributor::types::{RoleId, User};

/// Working set of role ids for a single authentication event.
///
/// Created by the host per event, handed to each contributor in turn and
/// consumed right after. Ids are unique and keep insertion order.
#[derive(Debug, Clone)]
pub struct RoleCollection {
    user: Option<User>,
    initial: Vec<RoleId>,
    role_ids: Vec<RoleId>,
}

impl RoleCollection {
    /// Duplicate initial ids collapse onto their first occurrence.
    pub fn new(user: Option<User>, initial: impl IntoIterator<Item = RoleId>) -> Self {
        let mut role_ids = Vec::new();
        for id in initial {
            if !role_ids.contains(&id) {
                role_ids.push(id);
            }
        }

        Self {
            user,
            initial: role_ids.clone(),
            role_ids,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn role_ids(&self) -> &[RoleId] {
        &self.role_ids
    }

    pub fn contains(&self, role_id: RoleId) -> bool {
        self.role_ids.contains(&role_id)
    }

    pub fn len(&self) -> usize {
        self.role_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.role_ids.is_empty()
    }

    /// Returns `true` if the id was not present yet.
    pub fn add_role_id(&mut self, role_id: RoleId) -> bool {
        if self.contains(role_id) {
            return false;
        }
        self.role_ids.push(role_id);
        true
    }

    /// Returns `true` if the id was present.
    pub fn remove_role_id(&mut self, role_id: RoleId) -> bool {
        let before = self.role_ids.len();
        self.role_ids.retain(|id| *id != role_id);
        self.role_ids.len() < before
    }

    /// Role ids as they were when the collection was created.
    pub fn initial_role_ids(&self) -> &[RoleId] {
        &self.initial
    }

    pub fn added_role_ids(&self) -> Vec<RoleId> {
        self.role_ids
            .iter()
            .copied()
            .filter(|id| !self.initial.contains(id))
            .collect()
    }

    pub fn removed_role_ids(&self) -> Vec<RoleId> {
        self.initial
            .iter()
            .copied()
            .filter(|id| !self.role_ids.contains(id))
            .collect()
    }

    pub fn into_role_ids(self) -> Vec<RoleId> {
        self.role_ids
    }
}
