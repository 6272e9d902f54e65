/*
 * Responsibility
 * - roles テーブル向け SQLx 操作 (読み取りのみ)
 * - PgPool を受け取り company 単位の名前引きを提供
 * - DB エラーは RepoError で返す (not found は Ok(None))
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::services::role_contributor::{CompanyId, Role, RoleId};

#[derive(Debug, FromRow)]
pub struct RoleRow {
    pub role_id: RoleId,
    pub company_id: CompanyId,
    pub name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role::new(row.role_id, row.company_id, row.name)
    }
}

#[derive(Clone, Debug)]
pub struct RoleRepo {
    pool: PgPool,
}

impl RoleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Exact (case-sensitive) name match within one company.
    pub async fn find_by_company_and_name(
        &self,
        company_id: CompanyId,
        name: &str,
    ) -> RepoResult<Option<RoleRow>> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT role_id, company_id, name
            FROM roles
            WHERE company_id = $1 AND name = $2
            "#,
        )
        .bind(company_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(row)
    }
}
