/*
 * Responsibility
 * - サインイン済みユーザーに grant role (既定: Administrator) を付与する
 * - revoke role (既定: AddRoleTest) があれば取り除く
 * - lookup 失敗は error ログのみ。認証フローは止めない
 */
use async_trait::async_trait;
use std::sync::Arc;

use crate::services::role_contributor::{
    collection::RoleCollection,
    contributor::RoleContributor,
    types::{Role, User},
};
use crate::services::role_directory::{DirectoryError, RoleDirectory};

pub const DEFAULT_GRANT_ROLE: &str = "Administrator";
pub const DEFAULT_REVOKE_ROLE: &str = "AddRoleTest";
pub const DEFAULT_ADMINISTRATOR_RANKING: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministratorRoleSettings {
    pub grant_role: String,
    // None: nothing is revoked
    pub revoke_role: Option<String>,
    pub ranking: i32,
}

impl Default for AdministratorRoleSettings {
    fn default() -> Self {
        Self {
            grant_role: DEFAULT_GRANT_ROLE.to_string(),
            revoke_role: Some(DEFAULT_REVOKE_ROLE.to_string()),
            ranking: DEFAULT_ADMINISTRATOR_RANKING,
        }
    }
}

/// A lookup that failed, with the role name it was for.
struct LookupFailure<'a> {
    role_name: &'a str,
    source: DirectoryError,
}

pub struct AdministratorRoleContributor {
    directory: Arc<dyn RoleDirectory>,
    settings: AdministratorRoleSettings,
}

impl AdministratorRoleContributor {
    pub fn new(directory: Arc<dyn RoleDirectory>, settings: AdministratorRoleSettings) -> Self {
        Self {
            directory,
            settings,
        }
    }

    async fn lookup<'a>(
        &self,
        user: &User,
        name: &'a str,
    ) -> Result<Option<Role>, LookupFailure<'a>> {
        self.directory
            .find_role_by_name(user.company_id, name)
            .await
            .map_err(|source| LookupFailure {
                role_name: name,
                source,
            })
    }

    /// Grant and revoke roles, looked up before anything is mutated.
    async fn lookup_roles(
        &self,
        user: &User,
    ) -> Result<(Option<Role>, Option<Role>), LookupFailure<'_>> {
        let grant = self.lookup(user, &self.settings.grant_role).await?;
        let revoke = match &self.settings.revoke_role {
            Some(name) => self.lookup(user, name).await?,
            None => None,
        };
        Ok((grant, revoke))
    }
}

#[async_trait]
impl RoleContributor for AdministratorRoleContributor {
    fn name(&self) -> &str {
        "administrator-role"
    }

    fn ranking(&self) -> i32 {
        self.settings.ranking
    }

    async fn contribute(&self, roles: &mut RoleCollection) {
        let Some(user) = roles.user().copied() else {
            return;
        };

        let (grant, revoke) = match self.lookup_roles(&user).await {
            Ok(found) => found,
            Err(failure) => {
                tracing::error!(
                    contributor = self.name(),
                    backend = self.directory.backend_name(),
                    company_id = user.company_id,
                    user_id = %user.user_id,
                    role_name = failure.role_name,
                    error = %failure.source,
                    "error getting role, leaving role collection unchanged"
                );
                return;
            }
        };

        if let Some(role) = grant {
            let added = roles.add_role_id(role.role_id);
            tracing::debug!(role_id = role.role_id, added, "granted role");
        }

        if let Some(role) = revoke {
            let removed = roles.remove_role_id(role.role_id);
            tracing::debug!(role_id = role.role_id, removed, "revoked role");
        }
    }
}
