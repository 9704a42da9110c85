use std::fmt;

/// A verse range identifier as the user writes it (e.g., "43 3:16-3:17").
///
/// The token is opaque to this crate except for one rule: book numbers
/// below ten arrive zero-padded ("01" through "09"), while the passage
/// endpoint keys ranges without the pad. `query_token` strips a single
/// leading zero so the request URL matches the endpoint's format. No
/// other validation or parsing is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRange(String);

impl VerseRange {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The token as it appears in the request URL: the raw identifier
    /// with at most one leading `0` removed.
    pub fn query_token(&self) -> &str {
        self.0.strip_prefix('0').unwrap_or(&self.0)
    }

    /// The identifier exactly as supplied.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
