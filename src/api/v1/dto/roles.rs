use serde::Serialize;

use crate::services::role_contributor::{CompanyId, Role, RoleId};

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role_id: RoleId,
    pub company_id: CompanyId,
    pub name: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            role_id: role.role_id,
            company_id: role.company_id,
            name: role.name,
        }
    }
}
