//! Logical search queries and cache key derivation.

/// A routed search query, canonicalized as strings.
///
/// Coordinate parameters are kept verbatim: the gateway performs no numeric
/// validation and forwards malformed values to the provider unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Free-text place search (place name to coordinates/geometry).
    Forward { text: String },
    /// Coordinate search (coordinates to place name).
    Reverse { latitude: String, longitude: String },
}

/// Separator between latitude and longitude in reverse cache keys.
///
/// A bare concatenation would collide across coordinate splits, e.g.
/// `("1","23")` and `("12","3")`.
const REVERSE_KEY_SEPARATOR: &str = ",";

impl Query {
    /// Derive the cache key for this query.
    ///
    /// Forward keys are the raw query text. Reverse keys join latitude and
    /// longitude with [`REVERSE_KEY_SEPARATOR`] so that distinct coordinate
    /// pairs always map to distinct keys.
    pub fn cache_key(&self) -> String {
        match self {
            Query::Forward { text } => text.clone(),
            Query::Reverse {
                latitude,
                longitude,
            } => format!("{latitude}{REVERSE_KEY_SEPARATOR}{longitude}"),
        }
    }
}
