use std::sync::Arc;

use courier::broker::{self, Broker};
use courier::config::BrokerConfig;
use courier::delivery::HttpDelivery;
use courier::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let config = BrokerConfig::from_env()?;
    tracing::info!(port = config.port, "starting message broker");

    let delivery = HttpDelivery::new(config.delivery_timeout)?;
    let broker = Arc::new(Broker::new(delivery));
    broker::serve(broker, &config.listen_addr()).await?;
    Ok(())
}
