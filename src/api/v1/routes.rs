/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /role-sets/resolve, /contributors, /companies/{company_id}/roles/{name}
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    contributors::list_contributors, health::health, role_sets::resolve_role_set, roles::get_role,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/role-sets/resolve", post(resolve_role_set))
        .route("/contributors", get(list_contributors))
        .route("/companies/{company_id}/roles/{name}", get(get_role))
}
