//! HTTP transport for the broker.
//!
//! ## Routes
//!
//! - `POST /subscribe` — `{ "topic", "url" }` → `{ "status": "subscribed", "topic", "url" }`
//! - `POST /publish` — `{ "topic", "data" }` → `{ "status": "published", "recipients": N }`
//! - `GET /health` — `{ "status": "ok", "service": "message-broker" }`
//!
//! Malformed bodies and missing fields answer `400 { "error": ... }`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::BrokerError;
use super::service::Broker;
use super::SERVICE_NAME;
use crate::delivery::Deliver;

/// Body of `POST /subscribe`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `POST /publish`. `data` is forwarded to subscribers unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Build an axum `Router` serving the broker API.
pub fn router<D: Deliver>(broker: Arc<Broker<D>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/subscribe", post(subscribe_handler::<D>))
        .route("/publish", post(publish_handler::<D>))
        .with_state(broker)
}

/// Serve the broker over HTTP at the given address (e.g. `"0.0.0.0:4000"`).
pub async fn serve<D: Deliver>(broker: Arc<Broker<D>>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(broker);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "message broker listening");
    axum::serve(listener, app).await
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

async fn subscribe_handler<D: Deliver>(
    State(broker): State<Arc<Broker<D>>>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Response {
    let result = body
        .map_err(rejected)
        .and_then(|Json(req)| {
            let topic = req.topic.ok_or_else(|| missing("topic"))?;
            let url = req.url.ok_or_else(|| missing("url"))?;
            broker.subscribe(&topic, &url)
        });

    match result {
        Ok(ack) => Json(json!({ "status": "subscribed", "topic": ack.topic, "url": ack.url }))
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn publish_handler<D: Deliver>(
    State(broker): State<Arc<Broker<D>>>,
    body: Result<Json<PublishRequest>, JsonRejection>,
) -> Response {
    let result = body
        .map_err(rejected)
        .and_then(|Json(req)| {
            let topic = req.topic.ok_or_else(|| missing("topic"))?;
            let data = req.data.ok_or_else(|| missing("data"))?;
            broker.publish(&topic, data)
        });

    match result {
        Ok(dispatch) => {
            Json(json!({ "status": "published", "recipients": dispatch.recipients }))
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

fn missing(field: &str) -> BrokerError {
    BrokerError::InvalidArgument(format!("missing {}", field))
}

fn rejected(rejection: JsonRejection) -> BrokerError {
    BrokerError::InvalidArgument(rejection.body_text())
}

fn error_response(err: BrokerError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
