use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    /// The requested post or file does not exist.
    #[error("not found: {0}")]
    NotFound(Utf8PathBuf),

    /// Reading an existing resource failed.
    #[error("failed to read {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BlogError {
    /// Classify an I/O error for `path`, separating missing resources from
    /// other failures.
    pub fn io(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_classified() {
        let err = BlogError::io("blog/x.html", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: blog/x.html");
    }

    #[test]
    fn test_other_io_errors_keep_source() {
        let err = BlogError::io(
            "blog/x.html",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "failed to read blog/x.html");
        assert!(std::error::Error::source(&err).is_some());
    }
}
