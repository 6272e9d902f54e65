//! Tenant-scoped role lookup used by contributors.
use async_trait::async_trait;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::role_contributor::{CompanyId, Role};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Lookup failures.
///
/// Not:
/// - "role not found" is NOT an error; it is `Ok(None)`.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("role lookup failed: {0}")]
    Repo(#[from] RepoError),
    #[error("role directory unavailable: {0}")]
    Unavailable(String),
}

/// Resolves roles by name within a company.
///
/// Returns:
/// - `Ok(Some(role))` when the company has a role with that exact name
/// - `Ok(None)` when it does not
/// - `Err(_)` when the lookup itself failed (backend down, etc.)
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn find_role_by_name(
        &self,
        company_id: CompanyId,
        name: &str,
    ) -> DirectoryResult<Option<Role>>;
}
