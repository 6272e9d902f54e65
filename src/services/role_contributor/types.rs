/*
 * Responsibility
 * - role 解決で共有する値型 (User / Role)
 * - 永続化・HTTP の都合はここに持ち込まない (repo / dto 側で変換する)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant (company) identifier. Roles are named uniquely per company.
pub type CompanyId = i64;

pub type RoleId = i64;

/// The user a role collection is being assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    pub user_id: Uuid,
    pub company_id: CompanyId,
}

impl User {
    pub fn new(user_id: Uuid, company_id: CompanyId) -> Self {
        Self {
            user_id,
            company_id,
        }
    }
}

/// A named role scoped to a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: RoleId,
    pub company_id: CompanyId,
    pub name: String,
}

impl Role {
    pub fn new(role_id: RoleId, company_id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            role_id,
            company_id,
            name: name.into(),
        }
    }
}
