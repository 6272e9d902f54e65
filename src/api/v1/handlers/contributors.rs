use axum::{Json, extract::State};

use crate::{api::v1::dto::contributors::ContributorResponse, state::AppState};

// Contributors in execution order.
pub async fn list_contributors(State(state): State<AppState>) -> Json<Vec<ContributorResponse>> {
    Json(
        state
            .chain
            .contributors()
            .map(ContributorResponse::from)
            .collect(),
    )
}
