use std::sync::Arc;

use crate::services::role_contributor::{
    collection::RoleCollection,
    contributor::RoleContributor,
    types::{RoleId, User},
};

/// Ordered set of contributors run against each role collection.
///
/// Contributors are kept sorted by ranking (descending). Equal rankings run
/// in registration order.
#[derive(Default)]
pub struct ContributorChain {
    contributors: Vec<Arc<dyn RoleContributor>>,
}

impl ContributorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contributors(
        contributors: impl IntoIterator<Item = Arc<dyn RoleContributor>>,
    ) -> Self {
        let mut chain = Self::new();
        for contributor in contributors {
            chain.register(contributor);
        }
        chain
    }

    pub fn register(&mut self, contributor: Arc<dyn RoleContributor>) {
        let ranking = contributor.ranking();

        // Insert before the first strictly lower ranking (stable for ties)
        let pos = self
            .contributors
            .iter()
            .position(|c| c.ranking() < ranking)
            .unwrap_or(self.contributors.len());

        tracing::debug!(
            contributor = contributor.name(),
            ranking,
            pos,
            "registered role contributor"
        );
        self.contributors.insert(pos, contributor);
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Contributors in execution order.
    pub fn contributors(&self) -> impl Iterator<Item = &dyn RoleContributor> {
        self.contributors.iter().map(|c| c.as_ref())
    }

    /// Runs every contributor once, in order, against `roles`.
    pub async fn contribute(&self, roles: &mut RoleCollection) {
        for contributor in &self.contributors {
            tracing::debug!(
                contributor = contributor.name(),
                ranking = contributor.ranking(),
                role_count = roles.len(),
                "role contributor called"
            );
            contributor.contribute(roles).await;
        }
    }

    /// Builds a collection for one event and runs the chain over it.
    pub async fn resolve(
        &self,
        user: Option<User>,
        initial: impl IntoIterator<Item = RoleId>,
    ) -> RoleCollection {
        let mut roles = RoleCollection::new(user, initial);
        self.contribute(&mut roles).await;
        roles
    }
}
