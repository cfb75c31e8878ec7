use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

/// What every subcommand needs: a pool and a log filter.
#[derive(Debug, Clone)]
pub(crate) struct DatabaseSettings {
    pub(crate) database_url: String,
    pub(crate) database_max_connections: u32,
    pub(crate) log_level: String,
}

impl DatabaseSettings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = get_required(&lookup, "DATABASE_URL")?;
        let database_max_connections =
            parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?;
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            database_url,
            database_max_connections,
            log_level,
        })
    }
}

/// Full settings of the HTTP server, on top of [`DatabaseSettings`].
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) database: DatabaseSettings,
    pub(crate) jwt_secret: String,
    pub(crate) jwt_ttl_seconds: i64,
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) media_root: PathBuf,
    pub(crate) http_request_body_limit_bytes: usize,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_request_timeout_secs: u64,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database = DatabaseSettings::from_lookup(&lookup)?;
        let jwt_secret = get_required(&lookup, "JWT_SECRET")?;
        let jwt_ttl_seconds: i64 = lookup("JWT_TTL_SECONDS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()
            .context("Failed to parse JWT_TTL_SECONDS, expecting integer")?;

        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            &lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let media_root =
            PathBuf::from(lookup("MEDIA_ROOT").unwrap_or_else(|| "./media".to_string()));
        let http_request_body_limit_bytes =
            parse_positive(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 5 * 1024 * 1024_usize)?;
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256_usize)?;
        let http_request_timeout_secs =
            parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10_u64)?;

        Ok(Self {
            database,
            jwt_secret,
            jwt_ttl_seconds,
            http_addr,
            cors_origins,
            media_root,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is required"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?,
        None => default,
    };

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
