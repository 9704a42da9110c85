use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The passage endpoint's JSON response body.
///
/// The body maps range keys to objects carrying the passage markup:
/// `{ "ranges": { "<key>": { "html": "..." } } }`. The requested range
/// is the map's first entry in document order; `serde_json` is built
/// with `preserve_order` so iteration follows the document. Keys are
/// canonicalized server-side and need not equal the request token.
/// Unknown fields at any level are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PassageResponse {
    pub ranges: serde_json::Map<String, Value>,
}

/// Shape errors in an otherwise well-formed response body.
#[derive(Debug, Error)]
pub enum PassageError {
    #[error("response contains no ranges")]
    NoRanges,

    #[error("range '{0}' has no html field")]
    MissingHtml(String),
}

impl PassageResponse {
    /// The first range entry in document order, as (key, html fragment).
    pub fn first_range(&self) -> Result<(&str, &str), PassageError> {
        let (key, entry) = self.ranges.iter().next().ok_or(PassageError::NoRanges)?;
        let html = entry
            .get("html")
            .and_then(Value::as_str)
            .ok_or_else(|| PassageError::MissingHtml(key.clone()))?;
        Ok((key.as_str(), html))
    }
}
