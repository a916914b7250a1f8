//! Backend stubs and gateway wiring.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use courier::config::GatewayConfig;
use courier::gateway::{self, Gateway};
use serde_json::{json, Value};

/// An address nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Bind to port 0 and return the actual base URL.
pub async fn start_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// An order-service replica that tags every answer with its name.
pub async fn start_order_service(name: &'static str) -> String {
    let app = Router::new()
        .route(
            "/orders",
            post(move |Json(order): Json<Value>| async move {
                Json(json!({ "status": "created", "handledBy": name, "items": order["items"] }))
            }),
        )
        .route(
            "/orders/user/:id",
            get(move |Path(id): Path<String>| async move {
                Json(json!([{ "user_id": id, "handledBy": name }]))
            }),
        );
    start_server(app).await
}

/// An order-service replica that always fails with a detailed error.
pub async fn start_broken_order_service() -> String {
    let fail = || async {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "MongoServerSelectionError: 10.0.0.7:27017" })),
        )
    };
    let app = Router::new()
        .route("/orders", post(fail))
        .route("/orders/user/:id", get(fail));
    start_server(app).await
}

pub async fn start_restaurant_service() -> String {
    let app = Router::new().route(
        "/menu",
        get(|| async {
            Json(json!([
                { "name": "Masala Dosa", "price": 120 },
                { "name": "Mango Lassi", "price": 60 }
            ]))
        }),
    );
    start_server(app).await
}

pub async fn start_user_service() -> String {
    let app = Router::new()
        .route(
            "/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (StatusCode::OK, Json(json!({ "token": "t-1", "user": body["email"] })))
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "error": "Invalid credentials" })),
                    )
                }
            }),
        )
        .route(
            "/signup",
            post(|| async { (StatusCode::CONFLICT, Json(json!({ "error": "User exists" }))) }),
        );
    start_server(app).await
}

/// A user service whose `/logout` counts hits and echoes what it got.
pub async fn start_logout_service() -> (String, Arc<AtomicU32>) {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&hits);
    let app = Router::new().route(
        "/logout",
        post(move |Json(body): Json<Value>| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "loggedOut": true, "received": body }))
            }
        }),
    );
    (start_server(app).await, hits)
}

pub struct Backends {
    pub orders: Vec<String>,
    pub restaurant: String,
    pub users: String,
}

/// Start a gateway over the given backends. Returns its base URL.
pub async fn start_gateway(backends: Backends) -> String {
    let mut env = HashMap::new();
    env.insert("ORDER_SERVICE_URLS", backends.orders.join(","));
    env.insert("RESTAURANT_SERVICE", backends.restaurant);
    env.insert("USER_SERVICE", backends.users);
    env.insert("UPSTREAM_TIMEOUT_MS", "2000".to_string());

    let config = GatewayConfig::from_lookup(|key| env.get(key).cloned()).unwrap();
    assert_eq!(config.upstream_timeout, Duration::from_secs(2));
    let gateway = Arc::new(Gateway::from_config(&config).unwrap());
    start_server(gateway::router(gateway)).await
}
