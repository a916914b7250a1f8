//! Example consumer: serves `/events` and subscribes to the broker in the background.

use std::time::Duration;

use courier::client::BrokerClient;
use courier::config::ListenerConfig;
use courier::subscriber::{self, ListenerState, SubscriptionLoop};
use courier::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let config = ListenerConfig::from_env()?;
    let client = BrokerClient::new(&config.broker_url, Duration::from_secs(5))?;

    // Not awaited: serving starts right away, events flow once this succeeds.
    let _registration =
        SubscriptionLoop::new(client, config.topic.clone(), config.self_url.clone()).spawn();

    let state = ListenerState::new(config.service.clone(), |event| {
        tracing::info!(%event, "handling event");
    });
    subscriber::serve(state, &config.listen_addr()).await?;
    Ok(())
}
