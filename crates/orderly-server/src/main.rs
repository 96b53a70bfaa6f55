//! # Orderly Server
//!
//! Hosts the user service, the order service, or both, depending on
//! `app.services`.

use orderly_config::{ConfigLoader, ObservabilityConfig};
use orderly_server::{app, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    telemetry::init_logging(&config.observability);

    info!("Starting Orderly Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = app::run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
