use async_trait::async_trait;

use crate::repos::role_repo::RoleRepo;
use crate::services::role_contributor::{CompanyId, Role};
use crate::services::role_directory::directory::{DirectoryResult, RoleDirectory};

/// PostgreSQL-backed directory (`roles` table).
#[derive(Clone, Debug)]
pub struct PgRoleDirectory {
    repo: RoleRepo,
}

impl PgRoleDirectory {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self {
            repo: RoleRepo::new(pool),
        }
    }
}

#[async_trait]
impl RoleDirectory for PgRoleDirectory {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_role_by_name(
        &self,
        company_id: CompanyId,
        name: &str,
    ) -> DirectoryResult<Option<Role>> {
        let row = self.repo.find_by_company_and_name(company_id, name).await?;
        Ok(row.map(Role::from))
    }
}
