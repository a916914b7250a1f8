//! Subscription registry - topic to subscriber endpoints.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::BrokerError;
use super::topic::Topic;

/// Acknowledgment returned by a successful subscribe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub topic: String,
    pub url: String,
    /// `false` when the endpoint was already registered for the topic.
    #[serde(skip)]
    pub added: bool,
}

/// In-memory registry of subscriptions.
///
/// Features:
/// - Thread-safe (share across tasks via `Clone`)
/// - Endpoints form a set per topic; repeated subscribes are no-ops
/// - Endpoints are resolved in the order they first subscribed
/// - State lives for the lifetime of the process only
///
/// ## Example
///
/// ```
/// use courier::broker::Registry;
///
/// let registry = Registry::new();
/// registry.subscribe("ORDER_CREATED", "http://localhost:8080/events").unwrap();
/// registry.subscribe("ORDER_CREATED", "http://localhost:8080/events").unwrap();
///
/// assert_eq!(registry.resolve("ORDER_CREATED"), vec!["http://localhost:8080/events"]);
/// assert!(registry.resolve("ORDER_CANCELLED").is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    topics: Arc<RwLock<HashMap<Topic, Vec<String>>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `endpoint` for `topic`.
    ///
    /// Inserting an endpoint that is already present leaves the registry
    /// unchanged and still acknowledges.
    pub fn subscribe(&self, topic: &str, endpoint: &str) -> Result<Ack, BrokerError> {
        let topic = Topic::new(topic)?;
        if endpoint.is_empty() {
            return Err(BrokerError::InvalidArgument("url must not be empty".into()));
        }

        let added = {
            let mut topics = self.topics.write().unwrap_or_else(PoisonError::into_inner);
            let endpoints = topics.entry(topic.clone()).or_default();
            if endpoints.iter().any(|e| e == endpoint) {
                false
            } else {
                endpoints.push(endpoint.to_string());
                true
            }
        };

        if added {
            info!(topic = %topic, url = endpoint, "new subscriber");
        }

        Ok(Ack {
            topic: topic.to_string(),
            url: endpoint.to_string(),
            added,
        })
    }

    /// Current endpoints for `topic`, empty when nobody is listening.
    pub fn resolve(&self, topic: &str) -> Vec<String> {
        self.topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of endpoints registered for `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .map_or(0, Vec::len)
    }

    /// All topics with at least one subscriber, sorted.
    pub fn topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        topics.sort();
        topics
    }
}
