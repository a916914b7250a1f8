//! Gateway - client-facing edge in front of the backend services.
//!
//! Each request is classified into a [`Route`], sent to a backend chosen
//! by the routing table ([`ReplicaSet`] round-robin or a fixed URL) and
//! its failure shaped by a [`FailurePolicy`], so clients never see which
//! replica failed or how.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use courier::config::GatewayConfig;
//! use courier::gateway::{self, Gateway};
//!
//! let config = GatewayConfig::from_env()?;
//! let gateway = Arc::new(Gateway::from_config(&config)?);
//! gateway::serve(gateway, &config.listen_addr()).await?;
//! ```

mod error;
mod forward;
mod http;
mod replica;
mod routes;

pub use error::UpstreamError;
pub use forward::{Forwarder, Upstream};
pub use http::{router, serve};
pub use replica::ReplicaSet;
pub use routes::{Backend, FailurePolicy, Gateway, GatewayResponse, Route, AUTH_PREFIX};

/// Name reported by the gateway's health endpoint.
pub const SERVICE_NAME: &str = "api-gateway";
