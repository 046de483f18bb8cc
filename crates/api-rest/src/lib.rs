//! # API REST
//!
//! REST surface for the MycoRisk scoring service.
//!
//! Handles:
//! - HTTP endpoints with axum (`/health`, `/score`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (wire models, error-to-status mapping, CORS)
//!
//! The scoring pipeline itself lives in `mycorisk-core`; this crate only
//! translates between JSON wire models and the typed domain.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use mycorisk_core::{DiseaseType, PatientRecord, ScoreError, ScoringService};

/// Application state shared across REST API handlers.
///
/// Holds the scoring service, which owns the classifier loaded once at
/// startup and shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    pub scoring: Arc<ScoringService>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, score),
    components(schemas(HealthRes, ScoreReq, ScoreRes, ErrorRes))
)]
pub struct ApiDoc;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Wire model for a scoring request: the 14 patient parameters.
///
/// `disease_type` carries the numeric category code from the training data;
/// code 5 is absent there and is rejected. Boolean fields map onto the
/// model's {0,1} domains.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScoreReq {
    /// White blood cell count, 10^9/L (0.0 to 50.0).
    pub wbc: f64,
    /// C-reactive protein, mg/L (0.0 to 500.0).
    pub crp: f64,
    /// Interleukin-6, pg/mL (0.0 to 1000.0).
    pub il6: f64,
    /// Procalcitonin, ng/mL (0.0 to 100.0).
    pub pct: f64,
    /// Patient is 65 or older.
    pub elderly: bool,
    /// Disease category code (0 to 20; 5 is not assigned).
    pub disease_type: u8,
    /// Patient is currently febrile.
    pub fever_status: bool,
    /// Restricted-class antimicrobials in use.
    pub restricted_antimicrobial_use: bool,
    /// Urinary catheter in place.
    pub urinary_catheterization: bool,
    /// Special-class antimicrobials in use.
    pub special_class_antimicrobial_use: bool,
    /// Any antimicrobial in use.
    pub antimicrobial_use: bool,
    /// Confirmed bacterial infection.
    pub bacterial_infection: bool,
    /// Two or more antimicrobials in combination.
    pub combination_antimicrobial_therapy: bool,
    /// Central venous catheter in place.
    pub central_venous_catheter: bool,
}

/// Wire model for a scoring result.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreRes {
    /// Probability of fungal infection, in [0, 1].
    pub probability: f64,
    /// Display form of the probability, e.g. "15.0%".
    pub percentage: String,
    /// Risk tier: LOW, MODERATE or HIGH.
    pub tier: String,
    /// Clinical guidance text for the tier.
    pub guidance: String,
}

/// Error body returned for rejected or failed requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    /// Field-level detail for validation failures, empty otherwise.
    pub violations: Vec<String>,
}

/// Builds the REST router with all routes, Swagger UI and CORS attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/score", post(score))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the MycoRisk service.
/// This endpoint is used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "MycoRisk is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/score",
    request_body = ScoreReq,
    responses(
        (status = 200, description = "Risk assessment", body = ScoreRes),
        (status = 400, description = "Input rejected by validation", body = ErrorRes),
        (status = 500, description = "Inference failure", body = ErrorRes),
        (status = 503, description = "Model unavailable", body = ErrorRes)
    )
)]
/// Score one patient record
///
/// Validates the submitted parameters, runs the pre-trained classifier and
/// returns the infection probability together with the risk tier and its
/// guidance text. Validation failures report every rejected field.
///
/// # Errors
/// Returns `400 Bad Request` with field-level detail if any parameter is
/// outside its declared domain, `503` if the model artifact is unavailable
/// and `500` for unexpected classifier failures.
#[axum::debug_handler]
pub async fn score(
    State(state): State<AppState>,
    Json(req): Json<ScoreReq>,
) -> Result<Json<ScoreRes>, (StatusCode, Json<ErrorRes>)> {
    let record = build_record(req).map_err(|message| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: "invalid input".into(),
                violations: vec![message],
            }),
        )
    })?;

    match state.scoring.score(&record) {
        Ok(assessment) => Ok(Json(ScoreRes {
            probability: assessment.probability.value(),
            percentage: assessment.probability.as_percentage(),
            tier: assessment.tier.as_str().to_string(),
            guidance: assessment.guidance.to_string(),
        })),
        Err(ScoreError::Validation(violations)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorRes {
                error: "invalid input".into(),
                violations: violations.iter().map(|v| v.to_string()).collect(),
            }),
        )),
        Err(e @ ScoreError::ModelUnavailable(_)) => {
            tracing::error!("Score error: {:?}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorRes {
                    error: "Scoring service unavailable".into(),
                    violations: Vec::new(),
                }),
            ))
        }
        Err(e @ ScoreError::Inference(_)) => {
            tracing::error!("Score error: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes {
                    error: "Internal error".into(),
                    violations: Vec::new(),
                }),
            ))
        }
    }
}

/// Translates the wire request into a typed patient record.
fn build_record(req: ScoreReq) -> Result<PatientRecord, String> {
    let disease_type = DiseaseType::from_code(req.disease_type).ok_or_else(|| {
        format!(
            "Disease type: code {} is not a recognised category",
            req.disease_type
        )
    })?;

    Ok(PatientRecord {
        wbc: req.wbc,
        crp: req.crp,
        il6: req.il6,
        pct: req.pct,
        elderly: req.elderly,
        disease_type,
        fever_status: req.fever_status,
        restricted_antimicrobial_use: req.restricted_antimicrobial_use,
        urinary_catheterization: req.urinary_catheterization,
        special_class_antimicrobial_use: req.special_class_antimicrobial_use,
        antimicrobial_use: req.antimicrobial_use,
        bacterial_infection: req.bacterial_infection,
        combination_antimicrobial_therapy: req.combination_antimicrobial_therapy,
        central_venous_catheter: req.central_venous_catheter,
    })
}
