//! Detached, fault-isolated delivery attempts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::Deliver;

/// Counts of finished delivery attempts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Attempts the endpoint accepted.
    pub delivered: u64,
    /// Attempts that failed (unreachable, non-2xx, timeout).
    pub failed: u64,
}

impl DeliveryStats {
    /// Total number of finished attempts.
    pub fn finished(&self) -> u64 {
        self.delivered + self.failed
    }
}

#[derive(Debug, Default)]
struct Counters {
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// Runs one delivery attempt per call, each on its own tokio task.
///
/// The worker never reports an outcome back to whoever spawned it.
/// Success and failure only reach the log and the [`DeliveryStats`]
/// counters.
pub struct DeliveryWorker<D> {
    transport: Arc<D>,
    counters: Arc<Counters>,
}

impl<D> Clone for DeliveryWorker<D> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            counters: Arc::clone(&self.counters),
        }
    }
}

impl<D: Deliver> DeliveryWorker<D> {
    pub fn new(transport: D) -> Self {
        Self {
            transport: Arc::new(transport),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Start one attempt on a detached task. Must be called inside a tokio runtime.
    ///
    /// The returned handle may be dropped; the attempt keeps running.
    pub fn spawn(&self, endpoint: String, payload: Arc<Value>) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move {
            worker.attempt(&endpoint, &payload).await;
        })
    }

    /// Make one attempt and record its outcome. Returns `true` on success.
    pub async fn attempt(&self, endpoint: &str, payload: &Value) -> bool {
        debug!(url = endpoint, "forwarding event");
        match self.transport.deliver(endpoint, payload).await {
            Ok(()) => {
                self.counters.delivered.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(err) => {
                warn!(url = endpoint, error = %err, "failed to push event");
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> DeliveryStats {
        DeliveryStats {
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    pub fn transport(&self) -> &D {
        &self.transport
    }
}
