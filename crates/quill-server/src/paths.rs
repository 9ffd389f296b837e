//! Request path handling.
//!
//! Request paths are mapped onto files below the site root, so every path is
//! normalized first. `..` can never climb above the root.

use camino::Utf8Path;

/// Normalize `path` to an absolute path with no empty, `.` or `..`
/// segments. The result never ends with `/` unless it is the root.
#[must_use]
pub fn clean(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

/// The directory containing `path`: everything before its last `/`.
#[must_use]
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(index) => &path[..index],
    }
}

/// The extension of the last segment of `path`, without the dot.
#[must_use]
pub fn extension(path: &str) -> Option<&str> {
    Utf8Path::new(path).extension()
}
