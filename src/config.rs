/*
 * Responsibility
 * - 環境変数の読み込み (DATABASE_URL, VALKEY_URL, contributor 設定など)
 * - 設定値のバリデーション (不正値なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::role_contributor::{
    AdministratorRoleSettings, Role,
    administrator::{DEFAULT_ADMINISTRATOR_RANKING, DEFAULT_GRANT_ROLE, DEFAULT_REVOKE_ROLE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // Fallback filter when RUST_LOG is not set
    pub log_filter: String,

    // None (development only): in-memory directory seeded from DEV_ROLES
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub dev_roles: Vec<Role>,

    pub valkey_url: Option<String>,
    pub role_cache_ttl_seconds: u64,

    pub administrator: AdministratorRoleSettings,

    pub http: HttpSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub fn from_source<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&var, "PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV").as_deref());

        let log_filter = non_empty(var("LOG_FILTER")).unwrap_or_else(|| "info".to_string());

        let database_url = non_empty(var("DATABASE_URL"));
        if database_url.is_none() && app_env.is_production() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        let database_max_connections = parse_or(&var, "DATABASE_MAX_CONNECTIONS", 5)?;

        let dev_roles = match var("DEV_ROLES") {
            Some(raw) => parse_roles(&raw).map_err(|_| ConfigError::Invalid("DEV_ROLES"))?,
            None => Vec::new(),
        };

        let valkey_url = non_empty(var("VALKEY_URL"));
        let role_cache_ttl_seconds = parse_or(&var, "ROLE_CACHE_TTL_SECONDS", 300)?;

        let grant_role = non_empty(var("ADMIN_CONTRIBUTOR_GRANT_ROLE"))
            .unwrap_or_else(|| DEFAULT_GRANT_ROLE.to_string());
        // Set but empty disables the revoke step
        let revoke_role = match var("ADMIN_CONTRIBUTOR_REVOKE_ROLE") {
            Some(v) => non_empty(Some(v)),
            None => Some(DEFAULT_REVOKE_ROLE.to_string()),
        };
        let ranking = parse_or(&var, "ADMIN_CONTRIBUTOR_RANKING", DEFAULT_ADMINISTRATOR_RANKING)?;

        let request_timeout_seconds: u64 = parse_or(&var, "REQUEST_TIMEOUT_SECONDS", 30)?;
        if request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"));
        }
        let body_limit_bytes = parse_or(&var, "REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            log_filter,
            database_url,
            database_max_connections,
            dev_roles,
            valkey_url,
            role_cache_ttl_seconds,
            administrator: AdministratorRoleSettings {
                grant_role,
                revoke_role,
                ranking,
            },
            http: HttpSettings {
                request_timeout: Duration::from_secs(request_timeout_seconds),
                body_limit_bytes,
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(var(key)) {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Parses `company:role_id:name` entries separated by commas.
pub fn parse_roles(raw: &str) -> Result<Vec<Role>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let company_id = parts.next().and_then(|v| v.trim().parse().ok());
            let role_id = parts.next().and_then(|v| v.trim().parse().ok());
            let name = parts.next().map(str::trim).filter(|v| !v.is_empty());

            match (company_id, role_id, name) {
                (Some(company_id), Some(role_id), Some(name)) => {
                    Ok(Role::new(role_id, company_id, name))
                }
                _ => Err(format!("malformed role entry: {entry}")),
            }
        })
        .collect()
}
