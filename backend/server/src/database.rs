//! # Redis
//!
//! Shared counters for request rate limiting.
//!
//! ## Implementation
//!
//! - One key per client and route: `rate_limit:{client}:{route}`
//! - `INCR` the key on every request, `EXPIRE` it on the first one
//! - The key vanishing is the window reset, so there is no cleanup job
//! - A key left without a TTL (crash between `INCR` and `EXPIRE`) gets its TTL
//!   restored on the next hit
//!
//! Without a configured redis the same fixed-window counting runs in process,
//! which is only correct for a single server instance.
use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

use crate::error::AppError;

pub const RATE_LIMIT_PREFIX: &str = "rate_limit:";

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, AppError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url)?;
    let connection_manager = client.get_connection_manager_with_config(config).await?;

    Ok(connection_manager)
}

/// Hits recorded in the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    pub count: u64,
    pub resets_in_secs: u64,
}

#[async_trait]
pub trait HitCounter: Send + Sync {
    /// Records one hit for `key` and reports the total so far in its window.
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowCount, AppError>;
}

pub struct RedisCounter {
    connection: ConnectionManager,
}

impl RedisCounter {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl HitCounter for RedisCounter {
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowCount, AppError> {
        let mut connection = self.connection.clone();
        let key = format!("{RATE_LIMIT_PREFIX}{key}");
        let window_secs = window.as_secs().max(1) as i64;

        let count: u64 = connection.incr(&key, 1).await?;
        if count == 1 {
            let _: () = connection.expire(&key, window_secs).await?;
        }

        let mut ttl: i64 = connection.ttl(&key).await?;
        if ttl < 0 {
            let _: () = connection.expire(&key, window_secs).await?;
            ttl = window_secs;
        }

        Ok(WindowCount {
            count,
            resets_in_secs: ttl as u64,
        })
    }
}

#[derive(Default)]
pub struct MemoryCounter {
    windows: Mutex<HashMap<String, (u64, Instant)>>,
}

impl MemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl HitCounter for MemoryCounter {
    async fn hit(&self, key: &str, window: Duration) -> Result<WindowCount, AppError> {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        windows.retain(|_, (_, started)| now.duration_since(*started) < window);

        let (count, started) = windows.entry(key.to_string()).or_insert((0, now));
        *count += 1;

        let elapsed = now.duration_since(*started);
        let resets_in = window.saturating_sub(elapsed);

        Ok(WindowCount {
            count: *count,
            resets_in_secs: resets_in.as_secs().max(1),
        })
    }
}
