use std::error::Error;
use std::fmt;

/// A failed attempt to register with the broker.
///
/// Never surfaced to callers of the host service; it only drives the
/// retry loop and its logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The broker answered `429 Too Many Requests`.
    RateLimited,
    /// The broker answered with another non-2xx status.
    Rejected(u16),
    /// The broker could not be reached or timed out.
    Unreachable(String),
}

impl RegistrationError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RegistrationError::RateLimited)
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::RateLimited => write!(f, "rate limited by broker"),
            RegistrationError::Rejected(code) => {
                write!(f, "broker rejected subscription with status {}", code)
            }
            RegistrationError::Unreachable(msg) => write!(f, "broker unreachable: {}", msg),
        }
    }
}

impl Error for RegistrationError {}

impl From<reqwest::Error> for RegistrationError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status.as_u16() == 429 => RegistrationError::RateLimited,
            Some(status) => RegistrationError::Rejected(status.as_u16()),
            None => RegistrationError::Unreachable(err.to_string()),
        }
    }
}
