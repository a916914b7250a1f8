use std::sync::Arc;

use courier::config::GatewayConfig;
use courier::gateway::{self, Gateway};
use courier::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let config = GatewayConfig::from_env()?;
    tracing::info!(
        port = config.port,
        order_replicas = config.order_services.len(),
        "starting api gateway"
    );

    let gateway = Arc::new(Gateway::from_config(&config)?);
    gateway::serve(gateway, &config.listen_addr()).await?;
    Ok(())
}
