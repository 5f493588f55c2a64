//! Server setup and initialization
//!
//! Provides the application builder, storage bootstrap and the server runner
//! that owns the eviction sweeper.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chat_common::{AppConfig, AppError, AppResult, StorageBackend};
use chat_core::traits::SystemClock;
use chat_db::{connect_with_retry, ensure_schema, PgMessageRepository, PgParticipantRepository};
use chat_service::{EvictionSweeper, ServiceContext, ServiceContextBuilder, SweeperConfig};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize the configured storage backend and build the service context
pub async fn create_service_context(config: &AppConfig) -> AppResult<ServiceContext> {
    let presence = config.presence.clone();

    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(ServiceContext::in_memory(Arc::new(SystemClock), presence))
        }
        StorageBackend::Postgres => {
            let url = config
                .database
                .url
                .clone()
                .ok_or_else(|| AppError::config("DATABASE_URL is required for postgres storage"))?;

            info!("Connecting to PostgreSQL...");
            let db_config = chat_db::DatabaseConfig {
                url,
                max_connections: config.database.max_connections,
                min_connections: config.database.min_connections,
                connect_attempts: config.database.connect_attempts,
                connect_retry_delay: Duration::from_millis(config.database.connect_retry_delay_ms),
                ..Default::default()
            };
            let pool = connect_with_retry(&db_config)
                .await
                .map_err(AppError::storage)?;
            ensure_schema(&pool)
                .await
                .map_err(AppError::storage)?;
            info!("PostgreSQL connection established");

            ServiceContextBuilder::new()
                .participant_repo(Arc::new(PgParticipantRepository::new(pool.clone())))
                .message_repo(Arc::new(PgMessageRepository::new(pool)))
                .clock(Arc::new(SystemClock))
                .presence(presence)
                .build()
                .map_err(AppError::internal)
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    let service_context = create_service_context(&config).await?;
    Ok(AppState::new(Arc::new(service_context), config))
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn run_server<F>(listener: TcpListener, app: Router, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::io("read listener address", e))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::io("serve", e))?;

    Ok(())
}

/// Run the complete server with configuration.
///
/// Storage failures abort startup. The sweeper starts once storage is ready
/// and is stopped after the HTTP server has drained.
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::config(format!("invalid listen address {}: {e}", config.api.address())))?;

    // Create app state
    let sweeper_config = SweeperConfig::from(&config.presence);
    let state = create_app_state(config).await?;

    // Start the sweeper
    let sweeper = EvictionSweeper::new(state.shared_context(), sweeper_config).spawn();

    // Build application
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::io(format!("bind {addr}"), e))?;

    let result = run_server(listener, app, shutdown_signal()).await;

    sweeper.shutdown().await;
    info!("Server stopped");

    result
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
