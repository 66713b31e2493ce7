//! Outbound client for the upstream place-search provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ORIGIN, REFERER};
use reqwest::StatusCode;
use tracing::error;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::query::Query;

const GEOCODE_FORWARD_URL: &str = "https://api.mapbox.com/search/geocode/v6/forward";
const GEOCODE_REVERSE_URL: &str = "https://api.mapbox.com/search/geocode/v6/reverse";

// The provider's access policy requires these to match the registered site.
const PROVIDER_ORIGIN: &str = "https://tshrestha.github.io";
const PROVIDER_REFERER: &str = "https://tshrestha.github.io/nawa";

/// Per-request timeout for upstream calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// How many idle connections to keep per host for reuse across invocations.
const MAX_IDLE_PER_HOST: usize = 20;
/// How long an idle connection stays open.
const IDLE_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Upstream search provider seam.
///
/// One attempt per request; classification of the raw response into a
/// success body or a gateway [`Error`] happens behind this trait.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Execute the query upstream, returning the raw response body on 200.
    async fn search(&self, query: &Query) -> Result<String>;
}

/// Mapbox Geocoding v6 client with a bounded connection pool.
///
/// The inner `reqwest::Client` is the process-wide pool; constructing this
/// once and sharing it across invocations is what amortizes TLS setup.
pub struct MapboxClient {
    http: reqwest::Client,
    access_token: String,
}

impl MapboxClient {
    /// Build the client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .pool_idle_timeout(IDLE_TIMEOUT)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self {
            http,
            access_token: config.mapbox_access_token.clone(),
        })
    }

    /// Build the provider request for a query: country and place-type
    /// filters, the access token, and the operation's own parameters.
    fn request_for(&self, query: &Query) -> reqwest::RequestBuilder {
        let filters = [
            ("country", "us"),
            ("types", "place"),
            ("access_token", self.access_token.as_str()),
        ];

        match query {
            Query::Forward { text } => self
                .http
                .get(GEOCODE_FORWARD_URL)
                .query(&filters)
                .query(&[("q", text.as_str())]),
            Query::Reverse {
                latitude,
                longitude,
            } => self
                .http
                .get(GEOCODE_REVERSE_URL)
                .query(&filters)
                .query(&[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                ]),
        }
    }
}

#[async_trait]
impl SearchProvider for MapboxClient {
    async fn search(&self, query: &Query) -> Result<String> {
        let request = self
            .request_for(query)
            .header(ORIGIN, PROVIDER_ORIGIN)
            .header(REFERER, PROVIDER_REFERER)
            .build()
            .map_err(Error::HttpClient)?;
        let url = request.url().clone();

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(url = %url, error = %e, "geocoding request failed");
                return Err(Error::UpstreamTransport {
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            error!(url = %url, status_code = status.as_u16(), "received unexpected status code");
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        // Raw body bytes are passed through unmodified; the gateway is a
        // transparent proxy for the payload shape.
        response.text().await.map_err(|e| {
            error!(url = %url, error = %e, "failed to read response body");
            Error::UpstreamTransport {
                message: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MapboxClient {
        let config = Config {
            cache_address: "localhost:6379".to_string(),
            cache_username: String::new(),
            cache_password: String::new(),
            mapbox_access_token: "pk.test-token".to_string(),
        };
        MapboxClient::new(&config).unwrap()
    }

    #[test]
    fn forward_request_carries_filters_and_text() {
        let query = Query::Forward {
            text: "New York".to_string(),
        };
        let request = client().request_for(&query).build().unwrap();
        let url = request.url().as_str();

        assert!(url.starts_with(GEOCODE_FORWARD_URL));
        assert!(url.contains("country=us"));
        assert!(url.contains("types=place"));
        assert!(url.contains("access_token=pk.test-token"));
        assert!(url.contains("q=New+York"));
    }

    #[test]
    fn reverse_request_carries_coordinates() {
        let query = Query::Reverse {
            latitude: "47.6".to_string(),
            longitude: "-122.3".to_string(),
        };
        let request = client().request_for(&query).build().unwrap();
        let url = request.url().as_str();

        assert!(url.starts_with(GEOCODE_REVERSE_URL));
        assert!(url.contains("latitude=47.6"));
        assert!(url.contains("longitude=-122.3"));
    }

    #[test]
    fn malformed_coordinates_are_forwarded_verbatim() {
        let query = Query::Reverse {
            latitude: "not-a-number".to_string(),
            longitude: String::new(),
        };
        let request = client().request_for(&query).build().unwrap();
        assert!(request.url().as_str().contains("latitude=not-a-number"));
    }
}
