//! Gateway routing table.
//!
//! | Route          | Backend                      | On failure                          |
//! |----------------|------------------------------|-------------------------------------|
//! | create order   | order replicas (round-robin) | 502 `Order Service Unavailable`      |
//! | order history  | order replicas (round-robin) | 502 `Order Service Unavailable`      |
//! | menu           | restaurant (fixed)           | 502 `Restaurant Service Unavailable` |
//! | auth           | user service (fixed)         | backend answer, else 500             |

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{error, info};

use super::error::UpstreamError;
use super::forward::Forwarder;
use super::replica::ReplicaSet;
use crate::config::{ConfigError, GatewayConfig};

/// Prefix stripped from auth requests before they reach the user service.
pub const AUTH_PREFIX: &str = "/auth";

/// A client request, classified by intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CreateOrder,
    OrderHistory { user_id: String },
    Menu,
    /// `path` is the request path with [`AUTH_PREFIX`] removed.
    Auth { path: String },
}

impl Route {
    /// Classify an auth request from its full path (query included).
    pub fn auth(request_path: &str) -> Self {
        let path = request_path
            .strip_prefix(AUTH_PREFIX)
            .unwrap_or(request_path)
            .to_string();
        Route::Auth { path }
    }

    pub fn method(&self) -> Method {
        match self {
            Route::CreateOrder | Route::Auth { .. } => Method::POST,
            Route::OrderHistory { .. } | Route::Menu => Method::GET,
        }
    }

    /// Path on the backend, appended to the selected endpoint.
    pub fn backend_path(&self) -> String {
        match self {
            Route::CreateOrder => "/orders".to_string(),
            Route::OrderHistory { user_id } => format!("/orders/user/{}", user_id),
            Route::Menu => "/menu".to_string(),
            Route::Auth { path } => path.clone(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Route::CreateOrder => "order",
            Route::OrderHistory { .. } => "order history",
            Route::Menu => "menu",
            Route::Auth { .. } => "auth",
        }
    }
}

/// Where a route's requests go.
#[derive(Debug)]
pub enum Backend {
    RoundRobin(ReplicaSet),
    Fixed(String),
}

impl Backend {
    /// Pick the endpoint for the next request.
    pub fn select(&self) -> &str {
        match self {
            Backend::RoundRobin(replicas) => replicas.next(),
            Backend::Fixed(url) => url.as_str(),
        }
    }
}

/// How a failed backend call is shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Always 502 with this fixed message.
    Uniform(&'static str),
    /// Relay the backend's own status and body; 500 with this message
    /// when there is no backend answer at all.
    Passthrough(&'static str),
}

/// What the gateway sends back to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Value,
}

impl GatewayResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// The uniform unavailability answer.
    pub fn unavailable(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    /// Apply `policy` to a failed backend call.
    pub fn from_failure(err: UpstreamError, policy: FailurePolicy) -> Self {
        match (policy, err) {
            (FailurePolicy::Uniform(message), _) => Self::unavailable(502, message),
            (FailurePolicy::Passthrough(_), UpstreamError::Status { status, body }) => {
                Self { status, body }
            }
            (FailurePolicy::Passthrough(message), _) => Self::unavailable(500, message),
        }
    }
}

/// The gateway: backends per route plus the shared forwarder.
pub struct Gateway {
    orders: Backend,
    restaurant: Backend,
    users: Backend,
    forwarder: Forwarder,
}

impl Gateway {
    pub fn new(orders: ReplicaSet, restaurant: String, users: String, forwarder: Forwarder) -> Self {
        Self {
            orders: Backend::RoundRobin(orders),
            restaurant: Backend::Fixed(trim_url(restaurant)),
            users: Backend::Fixed(trim_url(users)),
            forwarder,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let orders = ReplicaSet::new(
            "order-service",
            config.order_services.iter().cloned().map(trim_url).collect(),
        )?;
        let forwarder = Forwarder::new(config.upstream_timeout).map_err(|e| ConfigError::Invalid {
            key: "UPSTREAM_TIMEOUT_MS".into(),
            value: format!("{:?}", config.upstream_timeout),
            reason: e.to_string(),
        })?;
        Ok(Self::new(
            orders,
            config.restaurant_service.clone(),
            config.user_service.clone(),
            forwarder,
        ))
    }

    fn backend(&self, route: &Route) -> &Backend {
        match route {
            Route::CreateOrder | Route::OrderHistory { .. } => &self.orders,
            Route::Menu => &self.restaurant,
            Route::Auth { .. } => &self.users,
        }
    }

    pub fn failure_policy(route: &Route) -> FailurePolicy {
        match route {
            Route::CreateOrder | Route::OrderHistory { .. } => {
                FailurePolicy::Uniform("Order Service Unavailable")
            }
            Route::Menu => FailurePolicy::Uniform("Restaurant Service Unavailable"),
            Route::Auth { .. } => FailurePolicy::Passthrough("Auth Service Unavailable"),
        }
    }

    /// Full backend URL for `route`. Advances the round-robin cursor for
    /// replicated backends.
    pub fn target(&self, route: &Route) -> String {
        format!("{}{}", self.backend(route).select(), route.backend_path())
    }

    /// Forward a classified request and shape the answer for the client.
    pub async fn handle(&self, route: Route, body: Option<Value>) -> GatewayResponse {
        let target = self.target(&route);
        info!(route = route.label(), target = %target, "routing request");

        match self.forwarder.forward(route.method(), &target, body.as_ref()).await {
            Ok(body) => GatewayResponse::ok(body),
            Err(err) => {
                error!(route = route.label(), error = %err, "backend call failed");
                GatewayResponse::from_failure(err, Self::failure_policy(&route))
            }
        }
    }

    pub fn order_replicas(&self) -> Option<&ReplicaSet> {
        match &self.orders {
            Backend::RoundRobin(replicas) => Some(replicas),
            Backend::Fixed(_) => None,
        }
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
