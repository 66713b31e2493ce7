use thiserror::Error;

/// Convenient result alias for the gateway library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Recoverable conditions (cache misses, cache outages, cache write
/// failures) are deliberately not represented here: the orchestrator treats
/// them as control flow and never surfaces them to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A required environment variable was not set at startup.
    #[error("missing required environment variable {name}")]
    MissingEnv { name: String },

    /// The outbound HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    HttpClient(reqwest::Error),

    /// The upstream request failed at the transport level (DNS, connect,
    /// timeout). Carries the failure description for the response body.
    #[error("geocoding request failed: {message}")]
    UpstreamTransport { message: String },

    /// The upstream provider answered with a non-success status code.
    #[error("received unexpected status code {status}")]
    UpstreamStatus { status: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_message_contains_code() {
        let err = Error::UpstreamStatus { status: 503 };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn missing_env_names_the_variable() {
        let err = Error::MissingEnv {
            name: "mapbox_access_token".to_string(),
        };
        assert!(err.to_string().contains("mapbox_access_token"));
    }
}
