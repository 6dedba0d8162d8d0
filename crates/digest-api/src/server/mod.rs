//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use digest_common::{AppConfig, AppError, AppResult};
use digest_core::ReactionStore;
use digest_db::{create_pool, ensure_schema, PgReactionRepository, PoolConfig};
use digest_service::ServiceContext;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: &AppConfig) -> AppResult<AppState> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(AppError::database)?;
    ensure_schema(&pool).await.map_err(AppError::database)?;
    info!("PostgreSQL connection established");

    let store: Arc<dyn ReactionStore> = Arc::new(PgReactionRepository::new(pool));

    let service_context = ServiceContext::builder()
        .store(store)
        .counter_config(config.counter.clone())
        .digest_config(config.digest.clone())
        .build()
        .map_err(|e| AppError::Startup(e.to_string()))?;

    Ok(AppState::new(service_context))
}

/// Run the HTTP server until `shutdown` is cancelled
pub async fn run_server(
    app: Router,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> AppResult<()> {
    let addr = listener.local_addr()?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Cancel `token` on Ctrl-C or SIGTERM
pub async fn shutdown_signal(token: CancellationToken) {
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
        () = token.cancelled() => return,
    }

    info!("Shutdown signal received");
    token.cancel();
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();
    let shutdown = CancellationToken::new();

    let state = create_app_state(&config)
        .await?
        .with_shutdown(shutdown.clone());
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::bind(addr.as_str(), e))?;

    tokio::spawn(shutdown_signal(shutdown.clone()));
    run_server(app, listener, shutdown).await
}
