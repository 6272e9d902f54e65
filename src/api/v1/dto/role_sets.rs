/*
 * Responsibility
 * - role set 解決の request/response DTO
 * - validate() は形式チェックのみ (存在確認は directory 側)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::role_contributor::{CompanyId, RoleCollection, RoleId, User};

#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub user_id: Uuid,
    pub company_id: CompanyId,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User::new(dto.user_id, dto.company_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct ResolveRoleSetRequest {
    // null / missing: guest (no contributor mutates anything for it)
    #[serde(default)]
    pub user: Option<UserDto>,
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
}

impl ResolveRoleSetRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.role_ids.iter().any(|id| *id <= 0) {
            return Err("role_ids must be positive");
        }
        if let Some(user) = &self.user
            && user.company_id <= 0
        {
            return Err("company_id must be positive");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ResolveRoleSetResponse {
    pub user_id: Option<Uuid>,
    pub role_ids: Vec<RoleId>,
    pub added_role_ids: Vec<RoleId>,
    pub removed_role_ids: Vec<RoleId>,
    pub resolved_at: DateTime<Utc>,
}

impl From<RoleCollection> for ResolveRoleSetResponse {
    fn from(roles: RoleCollection) -> Self {
        Self {
            user_id: roles.user().map(|u| u.user_id),
            added_role_ids: roles.added_role_ids(),
            removed_role_ids: roles.removed_role_ids(),
            role_ids: roles.into_role_ids(),
            resolved_at: Utc::now(),
        }
    }
}
