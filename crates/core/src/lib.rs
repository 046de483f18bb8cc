//! # MycoRisk Core
//!
//! Core business logic for the fungal infection risk scoring service.
//!
//! This crate contains the pure scoring pipeline:
//! - The fixed 14-field [`PatientRecord`] with its typed disease categories
//! - Per-field domain validation collecting every violation
//! - The [`ScoringService`]: record in, probability and risk tier out
//! - The fixed tier thresholds and guidance text blocks
//!
//! **No API concerns**: HTTP servers and wire models belong in `api-rest`.
//! **No model format concerns**: the artifact format and its evaluation live
//! in `mycorisk-model`; core only sees the [`mycorisk_model::Classifier`]
//! trait.

pub mod config;
pub mod error;
pub mod record;
pub mod scoring;
pub mod tier;
pub mod validation;

pub use config::{resolve_model_artifact_path, CoreConfig, DEFAULT_MODEL_ARTIFACT};
pub use error::{FieldViolation, ScoreError, ScoreResult};
pub use record::{DiseaseType, PatientRecord, FEATURE_COLUMNS};
pub use scoring::{RiskAssessment, ScoringService};
pub use tier::RiskTier;
