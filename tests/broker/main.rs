//! Broker integration tests.
//!
//! Starts a broker and subscriber sinks as axum servers on ephemeral ports
//! and exercises them with reqwest.

mod client;
mod http;
