/*
 * Responsibility
 * - GET /companies/{company_id}/roles/{name}
 * - contributor が見る directory をそのまま覗く (運用確認用)
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::dto::roles::RoleResponse, error::AppError,
    services::role_contributor::CompanyId, state::AppState,
};

pub async fn get_role(
    State(state): State<AppState>,
    Path((company_id, name)): Path<(CompanyId, String)>,
) -> Result<Json<RoleResponse>, AppError> {
    let role = state
        .directory
        .find_role_by_name(company_id, &name)
        .await?
        .ok_or(AppError::not_found("role"))?;

    Ok(Json(RoleResponse::from(role)))
}
