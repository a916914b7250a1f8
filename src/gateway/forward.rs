//! Outbound calls from the gateway to its backends.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

use super::error::UpstreamError;

/// What a backend answered.
#[derive(Debug, Clone, PartialEq)]
pub struct Upstream {
    pub status: u16,
    pub body: Value,
}

/// Performs backend calls with a bounded timeout.
#[derive(Clone, Debug)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder whose calls time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Call `target` and require a 2xx answer.
    pub async fn forward(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
    ) -> Result<Value, UpstreamError> {
        let upstream = self.send(method, target, body).await?;
        if (200..300).contains(&upstream.status) {
            Ok(upstream.body)
        } else {
            Err(UpstreamError::Status {
                status: upstream.status,
                body: upstream.body,
            })
        }
    }

    /// Call `target` and return whatever it answered. Only transport
    /// failures are errors here.
    pub async fn send(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
    ) -> Result<Upstream, UpstreamError> {
        let mut request = self.client.request(method, target);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        Ok(Upstream {
            status,
            body: decode_body(&bytes),
        })
    }
}

/// JSON when possible, otherwise the text itself. Empty bodies become `null`.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
