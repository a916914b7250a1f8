//! Subscription retry loop.
//!
//! ```text
//!            failure: sleep(backoff.next(attempt)), attempt += 1
//!              ┌──────────┐
//!              ▼          │
//!   ┌──────────────────────┐   success   ┌────────────┐
//!   │ Attempting{attempt}  │────────────▶│ Subscribed │
//!   └──────────────────────┘             └────────────┘
//! ```
//!
//! There is no failure state: the loop keeps trying until the broker
//! accepts the subscription.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::backoff::BackoffPolicy;
use super::error::RegistrationError;
use super::Registrar;

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    /// About to make attempt number `attempt` (0-indexed).
    Attempting { attempt: u32 },
    /// Registered. Terminal.
    Subscribed,
}

impl RegistrationState {
    /// Apply the outcome of the current attempt.
    ///
    /// Returns the next state and, on failure, how long to wait before it.
    /// `Subscribed` absorbs every outcome.
    pub fn advance(
        self,
        outcome: &Result<(), RegistrationError>,
        backoff: &BackoffPolicy,
    ) -> (RegistrationState, Option<Duration>) {
        match (self, outcome) {
            (RegistrationState::Subscribed, _) => (RegistrationState::Subscribed, None),
            (RegistrationState::Attempting { .. }, Ok(())) => (RegistrationState::Subscribed, None),
            (RegistrationState::Attempting { attempt }, Err(_)) => (
                RegistrationState::Attempting {
                    attempt: attempt.saturating_add(1),
                },
                Some(backoff.next(attempt)),
            ),
        }
    }
}

/// Summary of a loop that reached `Subscribed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Register calls made, including the successful one.
    pub attempts: u32,
    /// Delays slept between attempts, in order.
    pub delays: Vec<Duration>,
}

/// Registers `url` for `topic` with the broker, retrying with backoff.
///
/// ## Example
///
/// ```ignore
/// let client = BrokerClient::new("http://localhost:4000", Duration::from_secs(5))?;
/// let handle = SubscriptionLoop::new(client, "ORDER_CREATED", "http://localhost:8080/events")
///     .spawn();
///
/// // The host keeps serving while the loop runs.
/// courier::subscriber::serve(listener_state, "0.0.0.0:8080").await?;
/// ```
pub struct SubscriptionLoop<R> {
    registrar: R,
    topic: String,
    url: String,
    backoff: BackoffPolicy,
}

impl<R: Registrar> SubscriptionLoop<R> {
    pub fn new(registrar: R, topic: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            registrar,
            topic: topic.into(),
            url: url.into(),
            backoff: BackoffPolicy::default(),
        }
    }

    /// Override the default 5s/60s doubling backoff.
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Drive the state machine until the broker accepts the subscription.
    pub async fn run(self) -> RegistrationReport {
        let mut state = RegistrationState::Attempting { attempt: 0 };
        let mut report = RegistrationReport::default();

        while let RegistrationState::Attempting { attempt } = state {
            let outcome = self.registrar.register(&self.topic, &self.url).await;
            report.attempts += 1;

            let (next, delay) = state.advance(&outcome, &self.backoff);
            match (&outcome, delay) {
                (Ok(()), _) => {
                    info!(topic = %self.topic, url = %self.url, attempts = report.attempts, "subscribed");
                }
                (Err(err), Some(delay)) if err.is_rate_limited() => {
                    warn!(
                        topic = %self.topic,
                        attempt,
                        retry_in = ?delay,
                        "subscription rate limited by broker"
                    );
                }
                (Err(err), delay) => {
                    warn!(
                        topic = %self.topic,
                        attempt,
                        retry_in = ?delay,
                        error = %err,
                        "failed to subscribe"
                    );
                }
            }

            if let Some(delay) = delay {
                report.delays.push(delay);
                tokio::time::sleep(delay).await;
            }
            state = next;
        }

        report
    }
}

impl<R: Registrar + 'static> SubscriptionLoop<R> {
    /// Run the loop on a detached tokio task so the host can keep serving.
    pub fn spawn(self) -> JoinHandle<RegistrationReport> {
        tokio::spawn(self.run())
    }
}
