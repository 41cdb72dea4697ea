//! Routing document error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for routing document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors raised while reading or validating a routing document.
///
/// Every field-level variant names the server or cache group that
/// triggered it.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read routing document {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse routing document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("routing document config missing 'domain_name'")]
    MissingDomain,

    #[error("routing document config 'domain_name' is not a string")]
    InvalidDomain,

    #[error("server '{0}' not in routing document")]
    ServerNotFound(String),

    #[error("server '{0}' has no cache group")]
    MissingCacheGroup(String),

    #[error("server '{0}' has no IP address")]
    MissingIp(String),

    #[error("server '{0}' has no port")]
    MissingPort(String),

    #[error("cache group '{0}' has no location in routing document")]
    MissingLocation(String),
}
