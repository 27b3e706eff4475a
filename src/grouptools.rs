//! Helpers for slash-separated group paths
//!
//! Tests are filed under hierarchical names such as `cl/vload/global/int2`.
//! Every prefix of a name (`cl`, `cl/vload`, `cl/vload/global`) is a group.

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Join segments into a group path, skipping empty segments.
///
/// # Examples
///
/// ```
/// use conformance_results::grouptools::join;
///
/// assert_eq!(join(&["foo", "bar"]), "foo/bar");
/// assert_eq!(join(&["", "foo"]), "foo");
/// ```
pub fn join<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Everything before the last segment, or `""` for a top-level name.
pub fn groupname(path: &str) -> &str {
    splitname(path).0
}

/// The last segment of a path.
pub fn testname(path: &str) -> &str {
    splitname(path).1
}

/// Split a path into `(groupname, testname)`.
pub fn splitname(path: &str) -> (&str, &str) {
    match path.rfind(SEPARATOR) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// All segments of a path.
pub fn split(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(SEPARATOR).collect()
}

/// Proper ancestor groups of a path, nearest first.
///
/// `"foo/foo/bar"` yields `"foo/foo"` then `"foo"`.
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    let mut current = path;
    std::iter::from_fn(move || {
        let parent = groupname(current);
        if parent.is_empty() {
            return None;
        }
        current = parent;
        Some(parent)
    })
}
