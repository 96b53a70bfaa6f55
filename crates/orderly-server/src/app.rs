//! Server startup and shutdown.

use crate::di::{AppModuleBuilder, CacheComponent};
use crate::telemetry;
use orderly_config::AppConfig;
use orderly_core::{OrderlyError, OrderlyResult};
use orderly_repository::{create_pool, DatabasePoolInterface};
use orderly_rest::create_router;
use tokio::signal;
use tracing::{error, info};

/// Runs the server until a shutdown signal arrives.
pub async fn run(config: AppConfig) -> OrderlyResult<()> {
    info!("Environment: {}", config.app.environment);
    info!("Services: {}", config.app.services);

    let db_pool = create_pool(&config.database).await?;
    db_pool.health_check().await?;

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let cache = CacheComponent::from_config(&config.redis)?;

    let module = AppModuleBuilder::new(config.app.services)
        .with_database_pool(db_pool.clone())
        .with_cache(cache)
        .with_password_hash_cost(config.security.password_hash_cost)
        .with_directory_config(config.directory.clone())
        .build()?;

    let metrics = telemetry::install_metrics(&config.observability)?;
    let router = create_router(
        module.into_state(),
        &config.server,
        &config.observability,
        metrics,
    );

    let addr = config.server.addr();
    info!("Starting REST server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| OrderlyError::Internal(format!("Failed to bind {addr}: {e}")))?;

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| OrderlyError::Internal(format!("REST server error: {e}")));

    db_pool.close().await;
    served?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
