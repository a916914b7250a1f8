use std::borrow::Borrow;
use std::fmt;

use super::error::BrokerError;

/// A named event category, e.g. `"ORDER_CREATED"`.
///
/// Topics are opaque and case-sensitive. The only rule is that they are
/// not empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(String);

impl Topic {
    /// Validate and wrap a topic name.
    pub fn new(name: impl Into<String>) -> Result<Self, BrokerError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BrokerError::InvalidArgument("topic must not be empty".into()));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Topic {
    fn borrow(&self) -> &str {
        &self.0
    }
}
