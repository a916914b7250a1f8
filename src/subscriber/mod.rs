//! Subscriber side - register with the broker and receive events.
//!
//! A consumer service does two things at startup, independently:
//!
//! 1. Serves its own HTTP endpoints, including the `POST /events`
//!    callback the broker delivers to ([`router`] / [`serve`]).
//! 2. Spawns a [`SubscriptionLoop`] that keeps calling the broker's
//!    `POST /subscribe` with capped exponential backoff until it succeeds.
//!
//! Until the loop succeeds the service is simply "not yet receiving
//! events"; nothing in the host's startup waits on it.

mod backoff;
mod error;
mod listener;
mod retry;

use std::future::Future;

pub use backoff::BackoffPolicy;
pub use error::RegistrationError;
pub use listener::{router, serve, ListenerState};
pub use retry::{RegistrationReport, RegistrationState, SubscriptionLoop};

/// Something that can register a callback URL for a topic.
///
/// [`crate::client::BrokerClient`] is the HTTP implementation.
pub trait Registrar: Send + Sync {
    /// Make one registration attempt.
    fn register(
        &self,
        topic: &str,
        url: &str,
    ) -> impl Future<Output = Result<(), RegistrationError>> + Send;
}
