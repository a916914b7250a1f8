//! Publish dispatcher - fire-and-forget fan-out.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::error::BrokerError;
use super::registry::Registry;
use super::topic::Topic;
use crate::delivery::{Deliver, DeliveryStats, DeliveryWorker};

/// Outcome of a publish, known before any delivery finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Number of subscribers a delivery was started for.
    pub recipients: usize,
}

/// Fans published events out to every subscriber of their topic.
///
/// `publish` resolves the subscribers, starts one detached delivery task
/// per endpoint and returns straight away. It never waits for, nor reads,
/// the outcome of those tasks.
pub struct Dispatcher<D> {
    registry: Registry,
    worker: DeliveryWorker<D>,
}

impl<D: Deliver> Dispatcher<D> {
    /// Create a dispatcher reading subscribers from `registry`.
    pub fn new(registry: Registry, transport: D) -> Self {
        Self {
            registry,
            worker: DeliveryWorker::new(transport),
        }
    }

    /// Publish `payload` on `topic`. Must be called inside a tokio runtime.
    ///
    /// Zero recipients is a normal outcome, not an error.
    pub fn publish(&self, topic: &str, payload: Value) -> Result<DispatchResult, BrokerError> {
        let topic = Topic::new(topic)?;
        info!(topic = %topic, "received event");

        let endpoints = self.registry.resolve(topic.as_str());
        let recipients = endpoints.len();
        let payload = Arc::new(payload);
        for endpoint in endpoints {
            // Detached: the handle is dropped on purpose.
            let _ = self.worker.spawn(endpoint, Arc::clone(&payload));
        }

        Ok(DispatchResult { recipients })
    }

    /// Delivery counters accumulated over the dispatcher's lifetime.
    pub fn stats(&self) -> DeliveryStats {
        self.worker.stats()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
