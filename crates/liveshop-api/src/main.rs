//! Liveshop API server entry point.

use std::sync::{Arc, Mutex};

use liveshop_core::clock::{SharedClock, SystemClock};
use liveshop_core::rng::{DeterministicRng, SystemRng};
use liveshop_event_log::RedisEventLog;
use liveshop_purchases::application::generator::{GENERATION_INTERVAL, PurchaseGenerator};
use liveshop_store::PgDomainStore;
use liveshop_store::{schema, seed};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use liveshop_api::config::Config;
use liveshop_api::error::AppError;
use liveshop_api::routes;
use liveshop_api::state::AppState;
use liveshop_api::telemetry;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Liveshop API server");

    // Domain store.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.store_timeout)
        .connect(&config.database_url)
        .await?;
    schema::run_migrations(&pool).await?;
    if config.seed_demo_data {
        seed::seed_demo_data(&pool).await?;
    }

    // Event log.
    let event_log = RedisEventLog::connect(&config.redis_url, config.store_timeout)
        .await
        .map_err(|e| AppError::EventLog(e.to_string()))?;

    let clock: SharedClock = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(SystemRng::from_os()));
    let domain_store = Arc::new(PgDomainStore::new(pool));
    let event_log = Arc::new(event_log);

    let generator = PurchaseGenerator::new(
        domain_store.clone(),
        event_log.clone(),
        clock.clone(),
        rng,
    )
    .start(GENERATION_INTERVAL);

    let app_state = AppState::new(clock, domain_store, event_log);

    // TODO: Restrict CORS to a configured dashboard origin instead of permissive().
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.bind_address()?;
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    generator.stop().await;
    tracing::info!("server stopped");
    telemetry.shutdown();

    served.map_err(AppError::from)
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}
