use mycorisk_model::ModelError;

/// A single input field rejected by domain validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    /// The training-time column name of the offending field.
    pub field: &'static str,
    /// Human-readable description of why the value was rejected.
    pub message: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// One or more fields fell outside their declared domain. All violations
    /// are collected so the caller can report every bad field at once.
    #[error("invalid input ({} field(s) rejected)", .0.len())]
    Validation(Vec<FieldViolation>),
    /// The model artifact could not be loaded. Fatal to the scoring
    /// capability; there is no fallback model.
    #[error("model artifact unavailable: {0}")]
    ModelUnavailable(#[source] ModelError),
    /// The classifier call failed after a successful load.
    #[error("inference failed: {0}")]
    Inference(#[source] ModelError),
}

pub type ScoreResult<T> = std::result::Result<T, ScoreError>;
