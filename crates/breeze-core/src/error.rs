//! Error types for breeze-core

use thiserror::Error;

/// Result type alias for breeze operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the breeze HTTP server
#[derive(Debug, Error)]
pub enum Error {
    /// Listen address did not resolve to a socket address
    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    /// IO error (bind, accept)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Page template failed to render
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}
