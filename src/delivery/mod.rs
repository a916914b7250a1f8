//! Delivery - one outbound attempt to one subscriber endpoint.
//!
//! The [`Deliver`] trait is the transport seam: the broker only ever asks
//! it to push a payload to an endpoint once. [`HttpDelivery`] is the
//! production transport (JSON `POST` via reqwest). Tests plug in their own
//! recording or failing transports.
//!
//! [`DeliveryWorker`] wraps a transport and runs each attempt as a detached
//! tokio task, so a slow or broken subscriber can never hold up the
//! publisher or any sibling delivery.

mod error;
mod http;
mod worker;

use std::future::Future;

use serde_json::Value;

pub use error::DeliveryError;
pub use http::HttpDelivery;
pub use worker::{DeliveryStats, DeliveryWorker};

/// Transport for pushing an event payload to a subscriber endpoint.
///
/// Implementations make exactly one attempt. Retrying is not their job.
pub trait Deliver: Send + Sync + 'static {
    /// Send `payload` to `endpoint`.
    fn deliver(
        &self,
        endpoint: &str,
        payload: &Value,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}
