//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you only want the
//! REST server (with OpenAPI/Swagger UI). The workspace's main `mycorisk-run`
//! binary is the deployment entry point.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use mycorisk_core::{resolve_model_artifact_path, CoreConfig, ScoringService};

/// Main entry point for the MycoRisk REST API server
///
/// Loads the model artifact once and starts the REST API server on the
/// configured address (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `MYCORISK_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `MYCORISK_MODEL_PATH`: Model artifact path override
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the model artifact cannot be located or loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MYCORISK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting MycoRisk REST API on {}", addr);

    let model_override = std::env::var("MYCORISK_MODEL_PATH").ok().map(PathBuf::from);
    let model_path = resolve_model_artifact_path(model_override)?;
    let cfg = CoreConfig::new(model_path)?;

    let scoring = ScoringService::load(&cfg)
        .map_err(|e| anyhow::anyhow!("failed to load model artifact: {e}"))?;

    let state = AppState {
        scoring: Arc::new(scoring),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
