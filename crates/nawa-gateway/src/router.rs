//! Request routing: method and path selection into a logical query.

use std::collections::HashMap;

use crate::query::Query;

/// Non-loggable routing rejections, mapped to client-error statuses.
///
/// Both variants are expected client misuse and are never logged as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// The final path segment names no known operation.
    NotFound,
    /// A known operation was requested with a method other than GET.
    MethodNotAllowed,
}

impl RouteError {
    /// HTTP status code for this rejection.
    pub fn status_code(&self) -> u16 {
        match self {
            RouteError::NotFound => 404,
            RouteError::MethodNotAllowed => 405,
        }
    }
}

/// Resolve method, path, and query-string parameters into a [`Query`].
///
/// The operation selector is the text after the last path delimiter:
/// exactly `forward` or `reverse`, anything else is a `NotFound`. Only GET
/// performs a query. Missing parameters default to the empty string and are
/// forwarded to the provider verbatim; its rejection becomes the gateway's
/// error response.
pub fn resolve_route(
    method: &str,
    path: &str,
    params: &HashMap<String, String>,
) -> Result<Query, RouteError> {
    let operation = path.rsplit('/').next().unwrap_or_default();

    let param = |name: &str| params.get(name).cloned().unwrap_or_default();

    match operation {
        "forward" | "reverse" if method != "GET" => Err(RouteError::MethodNotAllowed),
        "forward" => Ok(Query::Forward { text: param("q") }),
        "reverse" => Ok(Query::Reverse {
            latitude: param("lat"),
            longitude: param("lon"),
        }),
        _ => Err(RouteError::NotFound),
    }
}
