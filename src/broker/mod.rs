//! Broker - in-memory topic registry with fire-and-forget fan-out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 HTTP router (axum)                           │
//! │  POST /subscribe   POST /publish   GET /health               │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Broker<D>                                 │
//! │  subscribe() -> Registry        publish() -> Dispatcher      │
//! └─────────────────────────────────────────────────────────────┘
//!          │                                   │
//!          ▼                                   ▼
//! ┌─────────────────┐              ┌───────────────────────────┐
//! │    Registry     │◀── resolve ──│  Dispatcher (one detached │
//! │ topic -> [url]  │              │  task per subscriber)     │
//! └─────────────────┘              └───────────────────────────┘
//!                                              │
//!                                              ▼
//!                                  ┌───────────────────────────┐
//!                                  │  Deliver (HttpDelivery)   │
//!                                  └───────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use courier::broker::{self, Broker};
//! use courier::delivery::HttpDelivery;
//!
//! let delivery = HttpDelivery::new(Duration::from_secs(5))?;
//! let broker = Arc::new(Broker::new(delivery));
//! broker::serve(broker, "0.0.0.0:4000").await?;
//! ```

mod dispatcher;
mod error;
mod http;
mod registry;
mod service;
mod topic;

pub use dispatcher::{DispatchResult, Dispatcher};
pub use error::BrokerError;
pub use http::{router, serve, PublishRequest, SubscribeRequest};
pub use registry::{Ack, Registry};
pub use service::Broker;
pub use topic::Topic;

/// Name reported by the broker's health endpoint.
pub const SERVICE_NAME: &str = "message-broker";
