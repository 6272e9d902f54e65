/*
 * Responsibility
 * - POST /role-sets/resolve
 * - 1 リクエスト = 1 認証イベント: RoleCollection を作り chain を通して返す
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::dto::role_sets::{ResolveRoleSetRequest, ResolveRoleSetResponse},
    error::AppError,
    services::role_contributor::User,
    state::AppState,
};

pub async fn resolve_role_set(
    State(state): State<AppState>,
    Json(req): Json<ResolveRoleSetRequest>,
) -> Result<Json<ResolveRoleSetResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_ROLE_SET", msg))?;

    let user = req.user.map(User::from);
    let roles = state.chain.resolve(user, req.role_ids).await;

    tracing::info!(
        signed_in = roles.is_signed_in(),
        user_id = ?roles.user().map(|u| u.user_id),
        initial = ?roles.initial_role_ids(),
        role_ids = ?roles.role_ids(),
        added = ?roles.added_role_ids(),
        removed = ?roles.removed_role_ids(),
        "role set resolved"
    );
    if roles.is_signed_in() && roles.is_empty() {
        tracing::warn!(
            user_id = ?roles.user().map(|u| u.user_id),
            "signed-in user resolved to an empty role set"
        );
    }

    Ok(Json(ResolveRoleSetResponse::from(roles)))
}
