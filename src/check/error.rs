//! Error types for check execution.

use thiserror::Error;

/// Errors that end a single check early.
///
/// These never escape the check: the rendered message is recorded as a
/// failure reason and the rest of the batch carries on.
#[derive(Debug, Clone, Error)]
pub enum CheckError {
    /// The request could not be sent or no response arrived in time
    #[error("Error requesting {url}: {message}")]
    Request { url: String, message: String },

    /// The response body could not be read
    #[error("Error reading body of {url}: {message}")]
    ReadBody { url: String, message: String },

    /// A content or header pattern is not a valid regular expression
    #[error("Error parsing regexp {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl CheckError {
    /// Build a request error from a client error.
    pub(crate) fn request(url: &str, e: &reqwest::Error, timeout_seconds: u64) -> Self {
        CheckError::Request {
            url: url.to_string(),
            message: describe_transport_error(e, timeout_seconds),
        }
    }

    /// Build a body read error from a client error.
    pub(crate) fn read_body(url: &str, e: &reqwest::Error) -> Self {
        CheckError::ReadBody {
            url: url.to_string(),
            message: error_chain(e),
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, e: &regex::Error) -> Self {
        CheckError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        }
    }
}

/// Classify a transport error; timeouts get a fixed message, everything else
/// keeps its full cause chain so DNS and connect failures stay readable.
fn describe_transport_error(e: &reqwest::Error, timeout_seconds: u64) -> String {
    if e.is_timeout() {
        format!("request timeout after {}s", timeout_seconds)
    } else {
        error_chain(e)
    }
}

fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
