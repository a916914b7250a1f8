use std::error::Error;
use std::fmt;

/// Why a single delivery attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The endpoint could not be reached.
    Unreachable(String),
    /// The endpoint answered with a non-2xx status.
    Status(u16),
    /// No answer within the configured timeout.
    Timeout,
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Unreachable(msg) => write!(f, "endpoint unreachable: {}", msg),
            DeliveryError::Status(code) => write!(f, "endpoint responded with status {}", code),
            DeliveryError::Timeout => write!(f, "delivery timed out"),
        }
    }
}

impl Error for DeliveryError {}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DeliveryError::Timeout
        } else if let Some(status) = err.status() {
            DeliveryError::Status(status.as_u16())
        } else {
            DeliveryError::Unreachable(err.to_string())
        }
    }
}
