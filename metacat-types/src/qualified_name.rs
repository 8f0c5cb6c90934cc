//! Helpers for hierarchical qualified names.
//!
//! Qualified names are `/`-separated paths. Connections sit at
//! `default/<connector>/<epoch-seconds>` and every asset inside a connection
//! extends its parent's path with `/<name>`.

use crate::{Error, Result};

/// Separator between qualified-name segments.
pub const SEPARATOR: char = '/';

/// Number of segments in a connection's qualified name.
pub const CONNECTION_SEGMENTS: usize = 3;

/// Tenant prefix of every connection-scoped qualified name.
pub const DEFAULT_TENANT: &str = "default";

/// Appends `name` to `parent`.
pub fn join(parent: &str, name: &str) -> Result<String> {
    if parent.is_empty() {
        return Err(Error::InvalidQualifiedName(
            "parent qualified name is empty".to_string(),
        ));
    }
    if name.is_empty() {
        return Err(Error::InvalidQualifiedName(format!(
            "empty name under {parent}"
        )));
    }
    Ok(format!("{parent}{SEPARATOR}{name}"))
}

/// Everything before the last separator.
pub fn parent(qualified_name: &str) -> Option<&str> {
    qualified_name
        .rsplit_once(SEPARATOR)
        .map(|(parent, _)| parent)
        .filter(|p| !p.is_empty())
}

/// The final segment (the whole string when there is no separator).
pub fn last_segment(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once(SEPARATOR)
        .map_or(qualified_name, |(_, last)| last)
}

/// Number of segments.
pub fn depth(qualified_name: &str) -> usize {
    if qualified_name.is_empty() {
        0
    } else {
        qualified_name.split(SEPARATOR).count()
    }
}

/// The zero-based `n`th segment.
pub fn segment(qualified_name: &str, n: usize) -> Option<&str> {
    qualified_name.split(SEPARATOR).nth(n).filter(|s| !s.is_empty())
}

/// The first `n` segments, or `None` if there are fewer than `n`.
pub fn prefix(qualified_name: &str, n: usize) -> Option<&str> {
    if n == 0 || depth(qualified_name) < n {
        return None;
    }
    let end = qualified_name
        .match_indices(SEPARATOR)
        .nth(n - 1)
        .map_or(qualified_name.len(), |(idx, _)| idx);
    Some(&qualified_name[..end])
}

/// Qualified name of the connection that contains `qualified_name`.
pub fn connection_qualified_name(qualified_name: &str) -> Option<&str> {
    prefix(qualified_name, CONNECTION_SEGMENTS)
}

/// Connector segment of a connection-scoped qualified name.
pub fn connector_name(qualified_name: &str) -> Option<&str> {
    connection_qualified_name(qualified_name).and_then(|conn| segment(conn, 1))
}

/// Builds a connection qualified name.
pub fn connection(connector: &str, epoch_secs: i64) -> String {
    format!("{DEFAULT_TENANT}{SEPARATOR}{connector}{SEPARATOR}{epoch_secs}")
}

/// Checks that `qualified_name` has at least `min_depth` segments, none empty.
pub fn require_depth(qualified_name: &str, min_depth: usize, what: &str) -> Result<()> {
    let has_empty = qualified_name.split(SEPARATOR).any(str::is_empty);
    if has_empty || depth(qualified_name) < min_depth {
        return Err(Error::InvalidQualifiedName(format!(
            "{what} qualified name {qualified_name:?} needs at least {min_depth} non-empty segments"
        )));
    }
    Ok(())
}
