//! Binding path handling.
//!
//! Paths such as `params/param` address nested nodes. Every segment must be
//! non-empty; `a//b`, `/a` and `a/` are malformed.

/// The default segment separator.
pub const DEFAULT_SEPARATOR: char = '/';

/// Errors raised for malformed paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty path")]
    Empty,

    #[error("empty segment in path {0:?}")]
    EmptySegment(String),
}

/// Splits `path` on the first separator into `(head, rest)`.
///
/// `rest` is `None` when the path has no separator at all. No validation is
/// done here; callers decide what an empty head or rest means.
#[must_use]
pub fn split_head(path: &str, separator: char) -> (&str, Option<&str>) {
    match path.split_once(separator) {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

/// Splits `path` into its segments, rejecting empty ones.
pub fn segments(path: &str, separator: char) -> Result<Vec<&str>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    let parts: Vec<&str> = path.split(separator).collect();
    if parts.iter().any(|s| s.is_empty()) {
        return Err(PathError::EmptySegment(path.to_string()));
    }
    Ok(parts)
}
