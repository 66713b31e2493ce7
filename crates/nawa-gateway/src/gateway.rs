//! Cache-aside orchestration: the gateway's only real decision logic.
//!
//! Per request the orchestrator moves through
//! `CacheLookup -> {ProviderCall -> CachePopulate} -> Respond` with no
//! backward transitions and no retries. Every path through it produces a
//! shaped [`GatewayResponse`] with CORS headers attached.

use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::cache::{CacheStore, RESULT_TTL};
use crate::cors::OriginPolicy;
use crate::provider::SearchProvider;
use crate::router::resolve_route;

/// Inbound request as delivered by the invocation entrypoint.
///
/// Header keys are case-sensitive as supplied by the caller; the gateway
/// reads exactly `Origin`, matching what the entrypoint delivers.
#[derive(Debug, Clone, Default)]
pub struct GatewayRequest {
    pub method: String,
    pub path: String,
    pub query_string_parameters: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

impl GatewayRequest {
    /// The request's declared origin, empty when absent.
    pub fn origin(&self) -> &str {
        self.headers.get("Origin").map(String::as_str).unwrap_or("")
    }
}

/// Shaped response handed back to the invocation entrypoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

/// The cache-aside gateway over injected process-wide clients.
///
/// The cache store and provider client are constructed once per process
/// lifetime and shared by every invocation; the gateway itself holds no
/// per-request mutable state.
pub struct Gateway<C, P> {
    cache: C,
    provider: P,
    origins: OriginPolicy,
}

impl<C: CacheStore, P: SearchProvider> Gateway<C, P> {
    pub fn new(cache: C, provider: P, origins: OriginPolicy) -> Self {
        Self {
            cache,
            provider,
            origins,
        }
    }

    /// Handle one inbound request end to end.
    ///
    /// No failure here is fatal to the process: every error is scoped to
    /// this request and the shared clients are never torn down.
    pub async fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        info!(method = %request.method, path = %request.path, "received request");

        let origin = request.origin();
        let cors_headers = self.origins.headers_for(origin);

        // Preflight short-circuits before routing: CORS headers, no body.
        if self.origins.is_preflight(&request.method, origin) {
            return GatewayResponse {
                status_code: 200,
                body: String::new(),
                headers: cors_headers,
            };
        }

        let query = match resolve_route(
            &request.method,
            &request.path,
            &request.query_string_parameters,
        ) {
            Ok(query) => query,
            Err(rejection) => {
                // Expected client misuse, not logged as an error.
                return GatewayResponse {
                    status_code: rejection.status_code(),
                    body: String::new(),
                    headers: cors_headers,
                };
            }
        };

        let key = query.cache_key();

        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                info!(query = %key, "retrieved query result from cache");
                return GatewayResponse {
                    status_code: 200,
                    body: cached,
                    headers: cors_headers,
                };
            }
            Ok(None) => {
                info!(query = %key, "HTTP request is required to fetch query results");
            }
            Err(e) => {
                // A cache outage degrades to a miss, never a user-facing error.
                warn!(query = %key, error = %e, "failed to retrieve query result from cache");
            }
        }

        match self.provider.search(&query).await {
            Ok(body) => {
                // The value is already in hand; a failed write must not
                // fail the request.
                if let Err(e) = self.cache.set(&key, &body, RESULT_TTL).await {
                    error!(query = %key, error = %e, "failed to cache geocoding result");
                }
                GatewayResponse {
                    status_code: 200,
                    body,
                    headers: cors_headers,
                }
            }
            Err(e) => GatewayResponse {
                status_code: 500,
                body: e.to_string(),
                headers: cors_headers,
            },
        }
    }
}
