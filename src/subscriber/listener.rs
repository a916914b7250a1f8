//! HTTP callback endpoint for broker deliveries.
//!
//! ## Routes
//!
//! - `POST /events` — any JSON body; handed to the event handler, answers
//!   `{ "status": "received" }`.
//! - `GET /health` — `{ "status": "ok", "service": <name> }`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

type EventHandler = dyn Fn(Value) + Send + Sync;

/// State shared by the listener routes.
#[derive(Clone)]
pub struct ListenerState {
    service: String,
    handler: Arc<EventHandler>,
}

impl ListenerState {
    /// `service` is the name reported by `/health`; `handler` runs once
    /// per delivered event, on the blocking thread pool, and the delivery
    /// is acknowledged after it returns.
    pub fn new<F>(service: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        Self {
            service: service.into(),
            handler: Arc::new(handler),
        }
    }
}

/// Build an axum `Router` exposing the event callback.
pub fn router(state: ListenerState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/events", post(events_handler))
        .with_state(state)
}

/// Serve the listener over HTTP at the given address.
pub async fn serve(state: ListenerState, addr: &str) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "event listener ready");
    axum::serve(listener, app).await
}

async fn health_handler(State(state): State<ListenerState>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": state.service }))
}

async fn events_handler(
    State(state): State<ListenerState>,
    Json(event): Json<Value>,
) -> Response {
    tracing::info!(service = %state.service, "received event");
    let handler = Arc::clone(&state.handler);
    match tokio::task::spawn_blocking(move || handler(event)).await {
        Ok(()) => Json(json!({ "status": "received" })).into_response(),
        Err(err) => {
            tracing::error!(service = %state.service, error = %err, "event handler failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "event handler failed" })),
            )
                .into_response()
        }
    }
}
