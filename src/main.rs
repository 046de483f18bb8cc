use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use mycorisk_core::{resolve_model_artifact_path, CoreConfig, ScoringService};

/// Main entry point for the MycoRisk application
///
/// Resolves configuration, loads the pre-trained classifier artifact once,
/// and serves the REST API (with OpenAPI/Swagger documentation) for the
/// lifetime of the process. The loaded model is shared read-only across all
/// request handlers; a missing or corrupt artifact fails startup because
/// there is no fallback model.
///
/// # Environment Variables
/// - `MYCORISK_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MYCORISK_MODEL_PATH`: Model artifact path (default: search for
///   `models/fungal-gbt.json` from the working directory upwards)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mycorisk_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MYCORISK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let model_override = std::env::var("MYCORISK_MODEL_PATH").ok().map(PathBuf::from);
    let model_path = resolve_model_artifact_path(model_override)?;

    tracing::info!("++ Loading model artifact from {}", model_path.display());

    let cfg = CoreConfig::new(model_path)?;
    let scoring = ScoringService::load(&cfg)
        .map_err(|e| anyhow::anyhow!("failed to load model artifact: {e}"))?;

    let state = AppState {
        scoring: Arc::new(scoring),
    };

    tracing::info!("++ Starting MycoRisk REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
