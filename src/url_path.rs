//! Slash-joined request paths

use std::fmt;

/// Join `base` and `segment` with a single `/`.
///
/// Segments are inserted verbatim: no escaping, no validation.
pub fn append(base: &str, segment: &str) -> String {
    format!("{}/{}", base, segment)
}

/// A request path built by successive appends
///
/// Every append returns a new path; the receiver is left untouched so a
/// shared prefix can fan out into several queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlPath(String);

impl UrlPath {
    /// Start a path from a base URL
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// Append one segment
    #[must_use]
    pub fn append(&self, segment: &str) -> Self {
        Self(append(&self.0, segment))
    }

    /// Append several segments in order
    #[must_use]
    pub fn append_all<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Self {
        segments
            .into_iter()
            .fold(self.clone(), |path, segment| path.append(segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UrlPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
