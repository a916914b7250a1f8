//! Round-robin replica selection.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ConfigError;

/// An ordered, non-empty set of backend endpoints for one logical service.
///
/// Selection rotates through the endpoints in their configured order. The
/// read-and-advance of the cursor is a single atomic step, so concurrent
/// callers never lose an increment or reuse a slot within a rotation.
///
/// ## Example
///
/// ```
/// use courier::gateway::ReplicaSet;
///
/// let orders = ReplicaSet::new(
///     "order-service",
///     vec!["http://localhost:8001".into(), "http://localhost:8002".into()],
/// )
/// .unwrap();
///
/// assert_eq!(orders.next(), "http://localhost:8001");
/// assert_eq!(orders.next(), "http://localhost:8002");
/// assert_eq!(orders.next(), "http://localhost:8001");
/// ```
#[derive(Debug)]
pub struct ReplicaSet {
    endpoints: Vec<String>,
    cursor: AtomicUsize,
}

impl ReplicaSet {
    /// Fails with [`ConfigError::Empty`] when `endpoints` is empty.
    pub fn new(name: impl Into<String>, endpoints: Vec<String>) -> Result<Self, ConfigError> {
        if endpoints.is_empty() {
            return Err(ConfigError::Empty(name.into()));
        }
        Ok(Self {
            endpoints,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Pick the endpoint under the cursor and advance it.
    pub fn next(&self) -> &str {
        self.next_indexed().1
    }

    /// Like [`ReplicaSet::next`], also returning the cursor value observed
    /// before the advance.
    pub fn next_indexed(&self) -> (usize, &str) {
        let len = self.endpoints.len();
        let index = match self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| Some((c + 1) % len))
        {
            Ok(prev) | Err(prev) => prev,
        };
        (index, &self.endpoints[index])
    }

    /// Current cursor position (the index the next call will use).
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }
}
