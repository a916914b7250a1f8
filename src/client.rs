//! HTTP client for the broker API, used by producers and subscribers.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::broker::{DispatchResult, PublishRequest, SubscribeRequest};
use crate::subscriber::{Registrar, RegistrationError};

/// Error type for [`BrokerClient::publish`].
#[derive(Debug)]
pub enum PublishError {
    /// The broker could not be reached or timed out.
    ConnectionFailed(String),
    /// The broker answered with a non-2xx status.
    Rejected(u16),
    /// The broker's answer was not the expected shape.
    Decode(String),
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            PublishError::Rejected(code) => write!(f, "Event rejected with status {}", code),
            PublishError::Decode(msg) => write!(f, "Invalid broker response: {}", msg),
        }
    }
}

impl Error for PublishError {}

/// Talks to a broker at `base_url` (e.g. `http://localhost:4000`).
#[derive(Clone, Debug)]
pub struct BrokerClient {
    base_url: String,
    client: reqwest::Client,
}

impl BrokerClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register `url` to receive events published on `topic`.
    pub async fn subscribe(&self, topic: &str, url: &str) -> Result<(), RegistrationError> {
        let body = SubscribeRequest {
            topic: Some(topic.to_string()),
            url: Some(url.to_string()),
        };
        self.client
            .post(format!("{}/subscribe", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Publish `data` on `topic`. Returns how many subscribers it was sent to.
    pub async fn publish(&self, topic: &str, data: Value) -> Result<DispatchResult, PublishError> {
        let body = PublishRequest {
            topic: Some(topic.to_string()),
            data: Some(data),
        };
        let response = self
            .client
            .post(format!("{}/publish", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Rejected(status.as_u16()));
        }

        let reply: Value = response
            .json()
            .await
            .map_err(|e| PublishError::Decode(e.to_string()))?;
        let recipients = reply["recipients"]
            .as_u64()
            .ok_or_else(|| PublishError::Decode(format!("missing recipients in {}", reply)))?;
        Ok(DispatchResult {
            recipients: recipients as usize,
        })
    }
}

impl Registrar for BrokerClient {
    async fn register(&self, topic: &str, url: &str) -> Result<(), RegistrationError> {
        self.subscribe(topic, url).await
    }
}
