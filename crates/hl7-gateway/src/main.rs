//! Gateway binary: configuration from the environment, then serve.

use std::sync::Arc;

use hl7_gateway::{FileSink, Gateway, GatewayConfig, GatewayResult};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> GatewayResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env();
    let sink = Arc::new(FileSink::new(&config.save_dir)?);
    let gateway = Gateway::bind(&config, sink).await?;
    gateway.serve().await
}
