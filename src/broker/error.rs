//! Error types for broker operations.

use std::error::Error;
use std::fmt;

/// Error type for subscribe and publish requests.
///
/// Delivery failures never show up here: they are contained in the
/// delivery worker and only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// Missing or malformed topic, url or data.
    InvalidArgument(String),
}

impl fmt::Display for BrokerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrokerError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl Error for BrokerError {}

impl BrokerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            BrokerError::InvalidArgument(_) => 400,
        }
    }
}
