//! Logging and metrics setup.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use orderly_config::ObservabilityConfig;
use orderly_core::{OrderlyError, OrderlyResult};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

fn default_directives(level: &str) -> String {
    format!("{level},tower_http=debug,sqlx=warn")
}

/// Installs the Prometheus recorder when metrics are enabled.
pub fn install_metrics(config: &ObservabilityConfig) -> OrderlyResult<Option<PrometheusHandle>> {
    if !config.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| OrderlyError::Configuration(format!("Failed to install metrics recorder: {e}")))?;

    info!("Prometheus metrics exposed at {}", config.metrics_path);
    Ok(Some(handle))
}
