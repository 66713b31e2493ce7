//! Test utilities for gateway testing.
//!
//! Provides in-memory fakes for the two shared clients so orchestration
//! tests never touch a real cache backend or the upstream provider. Enable
//! the `test-utils` feature to use them from dependent crates.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheError, CacheStore};
use crate::error::{Error, Result};
use crate::gateway::GatewayRequest;
use crate::provider::SearchProvider;
use crate::query::Query;

fn simulated_outage() -> CacheError {
    CacheError::Redis(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "simulated cache outage",
    )))
}

/// In-memory [`CacheStore`] with switchable failure modes.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
    sets: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryCache {
    /// Seed an entry, bypassing the set-call counter.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Current value stored under `key`, if any.
    pub fn value_of(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Number of `set` calls observed.
    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Make every subsequent `get` fail like an unreachable backend.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent `set` fail like an unreachable backend.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, CacheError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(simulated_outage());
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        _ttl: Duration,
    ) -> std::result::Result<(), CacheError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated_outage());
        }
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// [`SearchProvider`] fake that replays scripted responses in order.
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<String>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    /// Queue a successful response body.
    pub fn push_ok(&self, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(body.to_string()));
    }

    /// Queue a classified provider error.
    pub fn push_err(&self, error: Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Number of `search` calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, _query: &Query) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedProvider called with no scripted response")
    }
}

/// A GET forward-search request for `text`, declaring `origin` when
/// non-empty.
pub fn forward_request(text: &str, origin: &str) -> GatewayRequest {
    let mut headers = HashMap::new();
    if !origin.is_empty() {
        headers.insert("Origin".to_string(), origin.to_string());
    }
    GatewayRequest {
        method: "GET".to_string(),
        path: "/.netlify/functions/geocoding/forward".to_string(),
        query_string_parameters: HashMap::from([("q".to_string(), text.to_string())]),
        headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_cache_round_trips() {
        let cache = MemoryCache::default();
        cache
            .set("k", "v", Duration::from_secs(1))
            .await
            .expect("set should succeed");
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(cache.set_calls(), 1);
    }

    #[tokio::test]
    async fn failing_cache_reports_errors() {
        let cache = MemoryCache::default();
        cache.fail_reads();
        cache.fail_writes();
        assert!(cache.get("k").await.is_err());
        assert!(cache.set("k", "v", Duration::from_secs(1)).await.is_err());
        assert_eq!(cache.set_calls(), 0);
    }

    #[tokio::test]
    async fn scripted_provider_replays_in_order() {
        let provider = ScriptedProvider::default();
        provider.push_ok("first");
        provider.push_err(Error::UpstreamStatus { status: 503 });

        let query = Query::Forward {
            text: "Seattle".to_string(),
        };
        assert_eq!(provider.search(&query).await.unwrap(), "first");
        assert!(provider.search(&query).await.is_err());
        assert_eq!(provider.calls(), 2);
    }
}
