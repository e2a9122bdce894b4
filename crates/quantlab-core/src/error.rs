//! Shared error type across QuantLab crates.

use thiserror::Error;

/// Failure classes (stable short codes for logs and metrics labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Invalid or inconsistent configuration.
    Config,
    /// Store could not be reached or answered with an unexpected status.
    Unreachable,
    /// Store rejected our credentials or permissions.
    AccessDenied,
    /// Object does not exist.
    NotFound,
    /// Object body is not a valid document.
    Malformed,
    /// Store did not answer within the configured timeout.
    Timeout,
    /// Internal error.
    Internal,
}

impl FailureKind {
    /// String representation used in logs, metrics and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Config => "CONFIG",
            FailureKind::Unreachable => "UNREACHABLE",
            FailureKind::AccessDenied => "ACCESS_DENIED",
            FailureKind::NotFound => "NOT_FOUND",
            FailureKind::Malformed => "MALFORMED",
            FailureKind::Timeout => "TIMEOUT",
            FailureKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, QuantlabError>;

/// Unified error type used by core and dashboard.
#[derive(Debug, Clone, Error)]
pub enum QuantlabError {
    #[error("config: {0}")]
    Config(String),
    #[error("store unreachable: {0}")]
    Unreachable(String),
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("malformed document: {0}")]
    Malformed(String),
    #[error("store timed out after {0} ms")]
    Timeout(u64),
    #[error("internal: {0}")]
    Internal(String),
}

impl QuantlabError {
    /// Collapse the error into its failure class.
    pub fn kind(&self) -> FailureKind {
        match self {
            QuantlabError::Config(_) => FailureKind::Config,
            QuantlabError::Unreachable(_) => FailureKind::Unreachable,
            QuantlabError::AccessDenied(_) => FailureKind::AccessDenied,
            QuantlabError::NotFound(_) => FailureKind::NotFound,
            QuantlabError::Malformed(_) => FailureKind::Malformed,
            QuantlabError::Timeout(_) => FailureKind::Timeout,
            QuantlabError::Internal(_) => FailureKind::Internal,
        }
    }
}
