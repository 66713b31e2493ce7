//! Core library for the nawa geocoding cache gateway.
//!
//! This crate implements the cache-aside orchestration that fronts the
//! Mapbox place-search API: inbound queries are answered from a Redis cache
//! when possible, fall through to the upstream provider on a miss, and are
//! shaped into uniform responses with reflected CORS headers. Higher-level
//! consumers (the Lambda handler) should only depend on the types exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod cache;
pub mod config;
pub mod cors;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod query;
pub mod router;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cache::{CacheError, CacheStore, RedisCache, RESULT_TTL};
pub use config::Config;
pub use cors::OriginPolicy;
pub use error::{Error, Result};
pub use gateway::{Gateway, GatewayRequest, GatewayResponse};
pub use provider::{MapboxClient, SearchProvider};
pub use query::Query;
pub use router::{resolve_route, RouteError};
