use async_trait::async_trait;

use crate::services::role_contributor::collection::RoleCollection;

/// Ranking used when a contributor does not declare one.
pub const DEFAULT_RANKING: i32 = 0;

/// One augmentation step run while a user's role set is assembled.
///
/// Contributors must not fail the authentication event: anything that goes
/// wrong is logged and the collection is left as it is.
#[async_trait]
pub trait RoleContributor: Send + Sync {
    fn name(&self) -> &str;

    /// Higher rankings run first.
    fn ranking(&self) -> i32 {
        DEFAULT_RANKING
    }

    async fn contribute(&self, roles: &mut RoleCollection);
}
