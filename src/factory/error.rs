//! Error types for check construction.

use thiserror::Error;

/// Errors that abort building the whole batch of checks.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The resolved request target is not a valid URL
    #[error("invalid URL '{url}' for check {check}: {source}")]
    InvalidUrl {
        check: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A header name or value cannot be sent over HTTP
    #[error("invalid header '{header}' for check {check}: {message}")]
    InvalidHeader {
        check: String,
        header: String,
        message: String,
    },
}
