//! HTTP transport for event delivery.

use std::time::Duration;

use serde_json::Value;

use super::{Deliver, DeliveryError};

/// Delivers events as JSON `POST` requests.
///
/// Every attempt is bounded by the timeout given at construction; an
/// attempt that runs out of time counts as a failure.
#[derive(Clone, Debug)]
pub struct HttpDelivery {
    client: reqwest::Client,
}

impl HttpDelivery {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Use an existing client (shares its connection pool and settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Deliver for HttpDelivery {
    async fn deliver(&self, endpoint: &str, payload: &Value) -> Result<(), DeliveryError> {
        let response = self.client.post(endpoint).json(payload).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status(status.as_u16()))
        }
    }
}
