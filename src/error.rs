//! Host error types.
//!
//! Every failure surfaced by the host surface is a [`HostError`]. Callers that
//! only care about the category match on [`HostError::kind`], which folds the
//! platform error codes into a closed set.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the host surface.
pub type HostResult<T> = Result<T, HostError>;

// ============================================================================
// ErrorKind
// ============================================================================

/// Closed error taxonomy for host operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    Malformed,
    Other,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::Malformed => "malformed",
            Self::Other => "other",
        }
    }
}

impl From<io::ErrorKind> for ErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof => {
                Self::Malformed
            }
            _ => Self::Other,
        }
    }
}

// ============================================================================
// HostError
// ============================================================================

/// Errors produced by host operations.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("IO error on `{}`", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error("gzip stream error")]
    Compression(#[source] io::Error),

    #[error("invalid JSON in `{}`", .0.display())]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("ipc `{command}` failed ({}): {message}", .kind.label())]
    Ipc {
        command: String,
        kind: ErrorKind,
        message: String,
    },

    #[error("ipc `{0}` timed out after {1:?}")]
    Timeout(String, Duration),

    #[error("privileged process is not running")]
    Disconnected,

    #[error("invalid address: {0}")]
    Address(String),

    #[error("background task failed: {0}")]
    Task(String),

    #[error("canvas encoding failed")]
    Canvas(#[from] image::ImageError),
}

impl HostError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::Io(path.into(), err)
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_, err) | Self::Compression(err) => err.kind().into(),
            Self::Json(_, err) if err.is_io() => ErrorKind::Other,
            Self::Json(..) | Self::Address(_) => ErrorKind::Malformed,
            Self::Ipc { kind, .. } => *kind,
            Self::Timeout(..) | Self::Disconnected | Self::Task(_) | Self::Canvas(_) => {
                ErrorKind::Other
            }
        }
    }

    /// True when the underlying resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_kind_mapping() {
        let err = HostError::io("a.txt", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_not_found());

        let err = HostError::io("a.txt", io::Error::new(io::ErrorKind::PermissionDenied, "no"));
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        let err = HostError::io("a.txt", io::Error::new(io::ErrorKind::InvalidData, "utf8"));
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = HostError::io("a.txt", io::Error::other("disk full"));
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_json_is_malformed() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = HostError::Json(PathBuf::from("package.json"), source);
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn test_ipc_carries_kind() {
        let err = HostError::Ipc {
            command: "getPath".into(),
            kind: ErrorKind::NotFound,
            message: "unknown path kind `nope`".into(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let display = err.to_string();
        assert!(display.contains("getPath"));
        assert!(display.contains("not found"));
    }

    #[test]
    fn test_transport_errors_are_other() {
        assert_eq!(HostError::Disconnected.kind(), ErrorKind::Other);
        assert_eq!(
            HostError::Timeout("x".into(), Duration::from_millis(5)).kind(),
            ErrorKind::Other
        );
        assert_eq!(HostError::Address("::".into()).kind(), ErrorKind::Malformed);
    }
}
