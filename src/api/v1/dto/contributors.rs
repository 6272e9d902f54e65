use serde::Serialize;

use crate::services::role_contributor::RoleContributor;

#[derive(Debug, Serialize)]
pub struct ContributorResponse {
    pub name: String,
    pub ranking: i32,
}

impl From<&dyn RoleContributor> for ContributorResponse {
    fn from(contributor: &dyn RoleContributor) -> Self {
        Self {
            name: contributor.name().to_string(),
            ranking: contributor.ranking(),
        }
    }
}
