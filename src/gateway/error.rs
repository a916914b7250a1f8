//! Error types for gateway upstream calls.

use std::error::Error;
use std::fmt;

use serde_json::Value;

/// A backend call that did not produce a usable response.
///
/// These never reach the client as-is: routes translate them into a fixed
/// unavailability body.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// Connection failed.
    Unreachable(String),
    /// No response within the configured timeout.
    Timeout,
    /// The backend answered with a non-2xx status.
    Status { status: u16, body: Value },
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Unreachable(msg) => write!(f, "upstream unreachable: {}", msg),
            UpstreamError::Timeout => write!(f, "upstream timed out"),
            UpstreamError::Status { status, .. } => {
                write!(f, "upstream responded with status {}", status)
            }
        }
    }
}

impl Error for UpstreamError {}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Unreachable(err.to_string())
        }
    }
}
