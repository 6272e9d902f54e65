/*
 * Responsibility
 * - Config読み込み → tracing 初期化 → 依存生成 (directory / chain) → Router 組み立て
 * - Middleware の適用 (request-id / trace / limit / timeout)
 * - axum::serve() で起動
 */
use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    config::{Config, HttpSettings},
    middleware,
    services::{
        cache::{ValkeyClient, client::ttl_seconds},
        role_contributor::{AdministratorRoleContributor, ContributorChain, RoleContributor},
        role_directory::{
            CachedRoleDirectory, InMemoryRoleDirectory, PgRoleDirectory, RoleDirectory,
        },
    },
    state::AppState,
};

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let directory = build_directory(&config).await?;
    let chain = build_chain(&config, directory.clone());
    if chain.is_empty() {
        tracing::warn!("no role contributors registered, role sets pass through unchanged");
    } else {
        tracing::info!(contributors = chain.len(), "role contributor chain ready");
    }
    let state = AppState::new(Arc::new(chain), directory);

    let app = build_router(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, env = ?config.app_env, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(!config.app_env.is_production())
        .init();
}

async fn build_directory(config: &Config) -> Result<Arc<dyn RoleDirectory>> {
    let base: Arc<dyn RoleDirectory> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .acquire_timeout(Duration::from_secs(5))
                .connect(url)
                .await
                .context("connecting to DATABASE_URL")?;
            Arc::new(PgRoleDirectory::new(pool))
        }
        None => {
            let directory = InMemoryRoleDirectory::with_roles(config.dev_roles.clone());
            tracing::warn!(
                seeded = directory.len(),
                "DATABASE_URL not set, using in-memory role directory"
            );
            Arc::new(directory)
        }
    };

    let Some(url) = &config.valkey_url else {
        return Ok(base);
    };

    let cache = ValkeyClient::new(url)
        .await
        .context("connecting to VALKEY_URL")?;
    tracing::info!(
        inner = base.backend_name(),
        ttl_seconds = config.role_cache_ttl_seconds,
        "role cache enabled"
    );

    Ok(Arc::new(CachedRoleDirectory::new(
        Arc::new(cache),
        base,
        ttl_seconds(config.role_cache_ttl_seconds),
    )))
}

fn build_chain(config: &Config, directory: Arc<dyn RoleDirectory>) -> ContributorChain {
    let administrator: Arc<dyn RoleContributor> = Arc::new(AdministratorRoleContributor::new(
        directory,
        config.administrator.clone(),
    ));

    ContributorChain::from_contributors([administrator])
}

fn build_router(state: AppState, http: &HttpSettings) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    middleware::http::apply(router, http)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use async_trait::async_trait;

    use crate::services::role_contributor::{AdministratorRoleSettings, CompanyId, Role};
    use crate::services::role_directory::DirectoryError;
    use crate::services::role_directory::directory::DirectoryResult;
    use crate::test_support::CapturedLogs;

    struct OfflineDirectory;

    #[async_trait]
    impl RoleDirectory for OfflineDirectory {
        fn backend_name(&self) -> &'static str {
            "offline"
        }

        async fn find_role_by_name(
            &self,
            _company_id: CompanyId,
            _name: &str,
        ) -> DirectoryResult<Option<Role>> {
            Err(DirectoryError::Unavailable("connection refused".into()))
        }
    }

    fn app() -> Router {
        app_with(Arc::new(InMemoryRoleDirectory::with_roles([
            Role::new(10, 1, "Administrator"),
            Role::new(20, 1, "AddRoleTest"),
        ])))
    }

    fn app_with(directory: Arc<dyn RoleDirectory>) -> Router {
        let administrator: Arc<dyn RoleContributor> = Arc::new(AdministratorRoleContributor::new(
            directory.clone(),
            AdministratorRoleSettings::default(),
        ));
        let chain = ContributorChain::from_contributors([administrator]);

        build_router(
            AppState::new(Arc::new(chain), directory),
            &HttpSettings::default(),
        )
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_responds_with_request_id() {
        let res = app().oneshot(get("/api/v1/health")).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(middleware::http::REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn resolve_applies_contributors() {
        let user_id = Uuid::new_v4();
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/role-sets/resolve",
                json!({
                    "user": { "user_id": user_id, "company_id": 1 },
                    "role_ids": [20, 30]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], json!(user_id));
        assert_eq!(body["role_ids"], json!([30, 10]));
        assert_eq!(body["added_role_ids"], json!([10]));
        assert_eq!(body["removed_role_ids"], json!([20]));
        assert!(body["resolved_at"].is_string());
    }

    #[tokio::test]
    async fn resolve_without_user_keeps_roles() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/role-sets/resolve",
                json!({ "user": null, "role_ids": [20, 30] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], Value::Null);
        assert_eq!(body["role_ids"], json!([20, 30]));
    }

    #[tokio::test]
    async fn resolve_rejects_non_positive_role_ids() {
        let (status, body) = send(
            app(),
            post_json("/api/v1/role-sets/resolve", json!({ "role_ids": [0] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ROLE_SET");
    }

    #[tokio::test]
    async fn contributors_are_listed_in_execution_order() {
        let (status, body) = send(app(), get("/api/v1/contributors")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{ "name": "administrator-role", "ranking": 100 }])
        );
    }

    #[tokio::test]
    async fn role_lookup_by_name() {
        let (status, body) = send(app(), get("/api/v1/companies/1/roles/Administrator")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role_id"], 10);

        let (status, body) = send(app(), get("/api/v1/companies/2/roles/Administrator")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn role_lookup_on_failing_directory_is_internal_error() {
        let (status, body) = send(
            app_with(Arc::new(OfflineDirectory)),
            get("/api/v1/companies/1/roles/Administrator"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["error"]["message"], "internal server error");
    }

    #[tokio::test]
    async fn resolve_on_failing_directory_returns_original_roles() {
        let (status, body) = send(
            app_with(Arc::new(OfflineDirectory)),
            post_json(
                "/api/v1/role-sets/resolve",
                json!({
                    "user": { "user_id": Uuid::new_v4(), "company_id": 1 },
                    "role_ids": [20, 30]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role_ids"], json!([20, 30]));
        assert_eq!(body["added_role_ids"], json!([]));
        assert_eq!(body["removed_role_ids"], json!([]));
    }

    #[tokio::test]
    async fn resolve_rejects_non_positive_company_id() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/role-sets/resolve",
                json!({
                    "user": { "user_id": Uuid::new_v4(), "company_id": 0 },
                    "role_ids": [30]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ROLE_SET");
        assert_eq!(body["error"]["message"], "company_id must be positive");
    }

    #[tokio::test]
    async fn empty_role_set_for_signed_in_user_is_logged() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/role-sets/resolve",
                json!({
                    "user": { "user_id": Uuid::new_v4(), "company_id": 2 },
                    "role_ids": []
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role_ids"], json!([]));
        let output = logs.contents();
        assert!(output.contains("role set resolved"));
        assert!(output.contains("signed-in user resolved to an empty role set"));
    }
}
