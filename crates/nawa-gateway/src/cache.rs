//! Key/value cache store backed by a remote Redis instance.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config::Config;

/// Time-to-live assigned to cached search results at write time.
pub const RESULT_TTL: Duration = Duration::from_secs(200 * 60 * 60);

/// Error talking to the cache backend.
///
/// Never surfaced to callers of the gateway: the orchestrator degrades a
/// failed read to a miss and swallows a failed write.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

/// Key/value storage with per-entry time-to-live.
///
/// Implementations must be safe for concurrent use across simultaneously
/// executing invocations. A miss is `Ok(None)`, not an error.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a cached value by key.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value under `key` with the given time-to-live.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}

/// Redis-backed cache store shared across invocations.
///
/// The connection manager is created on first use rather than at startup so
/// that an unreachable backend degrades to cache misses instead of failing
/// the cold start. Once established it reconnects automatically and is
/// cloned per command (clones share the underlying multiplexed connection).
pub struct RedisCache {
    client: redis::Client,
    manager: OnceCell<ConnectionManager>,
}

impl RedisCache {
    /// Create a cache store from configuration. Does not connect yet.
    pub fn new(config: &Config) -> Result<Self, CacheError> {
        Ok(Self {
            client: redis::Client::open(config.redis_url())?,
            manager: OnceCell::new(),
        })
    }

    async fn manager(&self) -> Result<ConnectionManager, CacheError> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(CacheError::from)
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager().await?;
        Ok(conn.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager().await?;
        let () = conn.set_ex(key, value, ttl.as_secs()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_ttl_is_two_hundred_hours() {
        assert_eq!(RESULT_TTL.as_secs(), 720_000);
    }

    #[test]
    fn new_rejects_malformed_address() {
        let config = Config {
            cache_address: "not a host:port at all".to_string(),
            cache_username: String::new(),
            cache_password: String::new(),
            mapbox_access_token: "pk.test".to_string(),
        };
        assert!(RedisCache::new(&config).is_err());
    }
}
