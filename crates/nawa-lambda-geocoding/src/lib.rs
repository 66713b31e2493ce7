//! Serverless function wiring the geocoding cache gateway to the Lambda
//! runtime.
//!
//! The shared clients (Redis cache, provider connection pool) are built
//! once at cold start and reused across invocations; per-request work is
//! delegated entirely to [`Gateway::handle`].

#![deny(warnings)]

pub mod event;
mod tracing_init;

use std::sync::OnceLock;

use lambda_runtime::{service_fn, Error as LambdaError, LambdaEvent};
use tracing::info;

use nawa_gateway::{
    CacheStore, Config, Gateway, GatewayRequest, MapboxClient, OriginPolicy, RedisCache,
    SearchProvider,
};

pub use event::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
pub use tracing_init::init_tracing;

/// Gateway over the production clients, held for the process lifetime.
type GeocodingGateway = Gateway<RedisCache, MapboxClient>;

static GATEWAY: OnceLock<GeocodingGateway> = OnceLock::new();

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), LambdaError> {
    init_tracing();

    let config = Config::from_env()?;
    let cache = RedisCache::new(&config)?;
    let provider = MapboxClient::new(&config)?;
    let gateway: &'static GeocodingGateway =
        GATEWAY.get_or_init(|| Gateway::new(cache, provider, OriginPolicy::default()));

    lambda_runtime::run(service_fn(move |event| handler(event, gateway))).await
}

/// Lambda handler invoked per request.
pub async fn handler<C: CacheStore, P: SearchProvider>(
    event: LambdaEvent<ApiGatewayProxyRequest>,
    gateway: &Gateway<C, P>,
) -> Result<ApiGatewayProxyResponse, LambdaError> {
    let request_id = event.context.request_id.clone();
    Ok(handle_event(event.payload, &request_id, gateway).await)
}

/// Handler body, separated from the Lambda envelope for testability.
pub async fn handle_event<C: CacheStore, P: SearchProvider>(
    event: ApiGatewayProxyRequest,
    request_id: &str,
    gateway: &Gateway<C, P>,
) -> ApiGatewayProxyResponse {
    let request = GatewayRequest::from(event);

    info!(
        request_id = %request_id,
        method = %request.method,
        path = %request.path,
        "handling geocoding request"
    );

    gateway.handle(&request).await.into()
}
