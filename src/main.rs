use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use pas_core::config::seed_file_from_env_value;
use pas_core::constants::DEFAULT_REST_ADDR;
use pas_core::seed::seed_from_config;
use pas_core::{CoreConfig, InMemoryPatientsRepository, InMemoryStore, PatientsService};

/// Main entry point for the patient administration server
///
/// Seeds the in-memory store once, then serves the REST API until interrupted.
///
/// # Environment Variables
/// - `PAS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PAS_SEED_FILE`: Seed fixture path (default: "sample-data.json"; empty disables seeding)
/// - `RUST_LOG`: Log filter, on top of the default `info` level for this workspace
///
/// A `.env` file in the working directory is loaded first if present.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the seed file exists but cannot be read, parsed or applied,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pas_run=info".parse()?)
                .add_directive("pas_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PAS_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let cfg = CoreConfig::new(seed_file_from_env_value(
        std::env::var("PAS_SEED_FILE").ok(),
    ));

    let store = Arc::new(InMemoryStore::new());
    seed_from_config(&cfg, &store).context("failed to seed patient store")?;

    let stats = store.stats();
    tracing::info!(
        "++ Store ready: {} patients, {} hospitals, {} visits, {} join rows",
        stats.patients,
        stats.hospitals,
        stats.visits,
        stats.relations
    );

    let service = PatientsService::new(Arc::new(InMemoryPatientsRepository::new(store)));
    let app = router(AppState::new(service));

    tracing::info!("++ Starting patient administration REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .with_context(|| format!("failed to bind {}", rest_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
