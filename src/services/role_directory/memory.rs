use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::services::role_contributor::{CompanyId, Role};
use crate::services::role_directory::directory::{DirectoryError, DirectoryResult, RoleDirectory};

/// Map-backed directory.
///
/// Used when no database is configured (development) and in tests.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    roles: RwLock<HashMap<(CompanyId, String), Role>>,
}

impl InMemoryRoleDirectory {
    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let map = roles
            .into_iter()
            .map(|role| ((role.company_id, role.name.clone()), role))
            .collect();

        Self {
            roles: RwLock::new(map),
        }
    }

    pub fn len(&self) -> usize {
        self.roles.read().map(|roles| roles.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RoleDirectory for InMemoryRoleDirectory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_role_by_name(
        &self,
        company_id: CompanyId,
        name: &str,
    ) -> DirectoryResult<Option<Role>> {
        let roles = self
            .roles
            .read()
            .map_err(|_| DirectoryError::Unavailable("in-memory directory poisoned".into()))?;

        Ok(roles.get(&(company_id, name.to_string())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_is_scoped_to_company() {
        let directory = InMemoryRoleDirectory::with_roles([
            Role::new(10, 1, "Administrator"),
            Role::new(11, 2, "Administrator"),
        ]);

        let found = directory.find_role_by_name(2, "Administrator").await.unwrap();
        assert_eq!(found, Some(Role::new(11, 2, "Administrator")));

        let missing = directory.find_role_by_name(3, "Administrator").await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn lookup_matches_names_exactly() {
        let directory = InMemoryRoleDirectory::with_roles([Role::new(10, 1, "Administrator")]);

        let found = directory.find_role_by_name(1, "administrator").await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn later_seed_replaces_same_company_and_name() {
        let directory = InMemoryRoleDirectory::with_roles([
            Role::new(10, 1, "Editor"),
            Role::new(12, 1, "Editor"),
        ]);

        assert_eq!(directory.len(), 1);
        let found = directory.find_role_by_name(1, "Editor").await.unwrap();
        assert_eq!(found.map(|r| r.role_id), Some(12));
    }
}
