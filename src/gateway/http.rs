//! HTTP transport for the gateway.
//!
//! ## Routes
//!
//! - `POST /orders` — round-robin to the order replicas
//! - `GET /orders/user/:id` — round-robin to the order replicas
//! - `GET /menu` — restaurant service
//! - `POST /auth`, `POST /auth/*` — user service, `/auth` prefix stripped
//! - `GET /health` — `{ "status": "ok", "service": "api-gateway" }`

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::routes::{Gateway, GatewayResponse, Route};
use super::SERVICE_NAME;

/// Build an axum `Router` for the gateway.
pub fn router(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/orders", post(create_order_handler))
        .route("/orders/user/:id", get(order_history_handler))
        .route("/menu", get(menu_handler))
        .route("/auth", post(auth_handler))
        .route("/auth/*rest", post(auth_handler))
        .with_state(gateway)
}

/// Serve the gateway over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(gateway: Arc<Gateway>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(gateway);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "api gateway listening");
    axum::serve(listener, app).await
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(self.body)).into_response()
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": SERVICE_NAME }))
}

async fn create_order_handler(State(gateway): State<Arc<Gateway>>, body: Bytes) -> Response {
    gateway
        .handle(Route::CreateOrder, Some(request_json(&body)))
        .await
        .into_response()
}

async fn order_history_handler(
    State(gateway): State<Arc<Gateway>>,
    Path(user_id): Path<String>,
) -> Response {
    gateway
        .handle(Route::OrderHistory { user_id }, None)
        .await
        .into_response()
}

async fn menu_handler(State(gateway): State<Arc<Gateway>>) -> Response {
    gateway.handle(Route::Menu, None).await.into_response()
}

async fn auth_handler(
    State(gateway): State<Arc<Gateway>>,
    uri: Uri,
    body: Bytes,
) -> Response {
    let request_path = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());
    gateway
        .handle(Route::auth(request_path), Some(request_json(&body)))
        .await
        .into_response()
}

/// The client's body as JSON. A missing or non-JSON body is forwarded as
/// `{}`; judging it is the backend's job.
fn request_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| json!({}))
}
