//! courier — a small HTTP pub/sub broker and the gateway in front of its services.
//!
//! - [`broker`]: topic registry, fire-and-forget fan-out, `/subscribe` + `/publish`.
//! - [`delivery`]: one isolated delivery attempt per subscriber.
//! - [`subscriber`]: backoff-driven registration loop and the `/events` callback.
//! - [`gateway`]: round-robin/fixed routing with a uniform failure contract.
//! - [`client`]: broker API client for producers and subscribers.

pub mod broker;
pub mod client;
pub mod config;
pub mod delivery;
pub mod gateway;
pub mod subscriber;
pub mod telemetry;

pub use broker::{Broker, Registry, Topic};
pub use client::{BrokerClient, PublishError};
pub use config::ConfigError;
pub use delivery::{Deliver, DeliveryError, HttpDelivery};
pub use gateway::{Gateway, ReplicaSet};
pub use subscriber::{BackoffPolicy, SubscriptionLoop};
