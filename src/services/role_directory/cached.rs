use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

use crate::services::cache::CacheClient;
use crate::services::role_contributor::{CompanyId, Role};
use crate::services::role_directory::directory::{DirectoryResult, RoleDirectory};

/// Read-through cache in front of another directory.
///
/// Fail-open: cache faults are logged and the inner directory answers.
/// Inner directory failures are returned as-is. Only found roles are cached,
/// so a role created later is picked up on the next lookup.
///
/// Entries are not invalidated on writes. A role deleted or renamed in the
/// inner directory keeps resolving to its cached id until the TTL expires,
/// so `ROLE_CACHE_TTL_SECONDS` bounds how long a contributor can act on a
/// stale id.
pub struct CachedRoleDirectory<C: CacheClient> {
    cache: Arc<C>,
    inner: Arc<dyn RoleDirectory>,
    ttl: Duration,
    // Key prefix to avoid collisions across environments
    prefix: String,
}

impl<C: CacheClient> CachedRoleDirectory<C> {
    pub fn new(cache: Arc<C>, inner: Arc<dyn RoleDirectory>, ttl: Duration) -> Self {
        Self::new_with_prefix(cache, inner, ttl, "roles:by-name")
    }

    pub fn new_with_prefix(
        cache: Arc<C>,
        inner: Arc<dyn RoleDirectory>,
        ttl: Duration,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            inner,
            ttl,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, company_id: CompanyId, name: &str) -> String {
        format!("{}:{}:{}", self.prefix, company_id, name)
    }

    async fn cached(&self, key: &str) -> Option<Role> {
        let raw = match self.cache.get_string(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(
                    backend = self.cache.backend_name(),
                    key = %key,
                    error = %err,
                    "role cache read failed, falling back to directory"
                );
                return None;
            }
        };

        match serde_json::from_str::<Role>(&raw) {
            Ok(role) => Some(role),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "discarding undecodable cached role");
                if let Err(err) = self.cache.del(key).await {
                    tracing::warn!(key = %key, error = %err, "role cache delete failed");
                }
                None
            }
        }
    }

    async fn store(&self, key: &str, role: &Role) {
        let value = match serde_json::to_string(role) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "role not cacheable");
                return;
            }
        };

        if let Err(err) = self.cache.set_with_ttl(key, &value, self.ttl).await {
            tracing::warn!(
                backend = self.cache.backend_name(),
                key = %key,
                error = %err,
                "role cache write failed"
            );
        }
    }
}

#[async_trait]
impl<C: CacheClient> RoleDirectory for CachedRoleDirectory<C> {
    fn backend_name(&self) -> &'static str {
        "cached"
    }

    async fn find_role_by_name(
        &self,
        company_id: CompanyId,
        name: &str,
    ) -> DirectoryResult<Option<Role>> {
        let key = self.key(company_id, name);

        if let Some(role) = self.cached(&key).await {
            tracing::debug!(key = %key, role_id = role.role_id, "role cache hit");
            return Ok(Some(role));
        }

        let found = self.inner.find_role_by_name(company_id, name).await?;
        if let Some(role) = &found {
            self.store(&key, role).await;
        }

        Ok(found)
    }
}
