use serde_json::Value;

use super::dispatcher::{DispatchResult, Dispatcher};
use super::error::BrokerError;
use super::registry::{Ack, Registry};
use crate::delivery::{Deliver, DeliveryStats};

/// A broker: one registry plus the dispatcher that reads from it.
///
/// Generic over `D`, the delivery transport. The HTTP router shares a
/// broker between requests via `Arc<Broker<D>>`.
pub struct Broker<D> {
    registry: Registry,
    dispatcher: Dispatcher<D>,
}

impl<D: Deliver> Broker<D> {
    /// Create a broker with an empty registry.
    pub fn new(transport: D) -> Self {
        Self::with_registry(Registry::new(), transport)
    }

    /// Create a broker over an existing registry handle.
    pub fn with_registry(registry: Registry, transport: D) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry.clone(), transport),
            registry,
        }
    }

    pub fn subscribe(&self, topic: &str, url: &str) -> Result<Ack, BrokerError> {
        self.registry.subscribe(topic, url)
    }

    pub fn publish(&self, topic: &str, data: Value) -> Result<DispatchResult, BrokerError> {
        self.dispatcher.publish(topic, data)
    }

    pub fn resolve(&self, topic: &str) -> Vec<String> {
        self.registry.resolve(topic)
    }

    pub fn stats(&self) -> DeliveryStats {
        self.dispatcher.stats()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
