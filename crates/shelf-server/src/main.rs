//! # Shelf Server
//!
//! Entry point: loads configuration, initializes logging, connects the
//! database and cache, and serves the REST API until a shutdown signal.

use shelf_config::ConfigLoader;
use shelf_core::{ShelfError, ShelfResult};
use shelf_repository::create_pool;
use shelf_rest::create_router;
use shelf_server::{
    di::{build_cache_store, AppModuleBuilder},
    logging::init_logging,
    startup::{print_banner, print_startup_info},
};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("shelf-server failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> ShelfResult<()> {
    let config = ConfigLoader::from_default_location().load()?;

    init_logging(&config.observability);
    print_banner();
    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);

    let db_pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let cache_store = build_cache_store(&config.cache, &config.redis).await?;

    if let Err(e) = tokio::fs::create_dir_all(&config.storage.upload_dir).await {
        warn!("Could not create upload directory {}: {}", config.storage.upload_dir, e);
    }

    let state = AppModuleBuilder::new(config.clone())
        .with_database_pool(db_pool.clone())
        .with_cache_store(cache_store)
        .build()?;

    let router = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ShelfError::Internal(format!("Failed to bind {addr}: {e}")))?;

    print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ShelfError::Internal(format!("REST server error: {e}")))?;

    db_pool.close().await;
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
