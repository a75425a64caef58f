use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::{error::AppError, retry::RetryPolicy};

pub struct Config {
    pub port: u16,
    pub catalog_path: String,
    pub elastic_url: Option<String>,
    pub elastic_api_key: Option<String>,
    pub search_timeout: Duration,
    pub search_retry: RetryPolicy,
    pub redis_url: Option<String>,
    pub rate_limit: u64,
    pub rate_limit_window: Duration,
    pub slow_request: Duration,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            port: try_load("RUST_PORT", "8080")?,
            catalog_path: try_load("CATALOG_PATH", "catalog.json")?,
            elastic_url: optional(try_load("ELASTIC_URL", "http://localhost:9200")?),
            elastic_api_key: read_secret("ELASTIC_API_KEY"),
            search_timeout: Duration::from_millis(try_load("SEARCH_TIMEOUT_MS", "3000")?),
            search_retry: RetryPolicy {
                max_attempts: try_load("SEARCH_RETRY_ATTEMPTS", "1")?,
                delay: Duration::from_millis(try_load("SEARCH_RETRY_DELAY_MS", "200")?),
                multiplier: 1.5,
            },
            redis_url: optional(try_load("REDIS_URL", "")?),
            rate_limit: try_load("RATE_LIMIT", "30")?,
            rate_limit_window: Duration::from_secs(try_load("RATE_LIMIT_WINDOW_SECS", "60")?),
            slow_request: Duration::from_millis(try_load("SLOW_REQUEST_MS", "1000")?),
        })
    }
}

fn optional(value: String) -> Option<String> {
    let value = value.trim();

    (!value.is_empty()).then(|| value.to_string())
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("{key}: {e}"))
        })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("No {secret_name} secret available: {e}");
        })
        .ok()
        .filter(|s| !s.is_empty())
}
