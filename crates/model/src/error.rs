#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    ArtifactRead(std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    ArtifactParse(serde_json::Error),
    #[error("unsupported artifact schema version {found} (supported: {supported})")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    #[error("artifact feature columns do not match the serving schema: {0}")]
    FeatureMismatch(String),
    #[error("artifact ensemble is structurally invalid: {0}")]
    MalformedEnsemble(String),
    #[error("feature row has {found} values, model expects {expected}")]
    RowWidth { expected: usize, found: usize },
    #[error("classifier produced a non-finite score")]
    NonFiniteScore,
    #[error("classifier produced probability {0} outside [0.0, 1.0]")]
    ImproperProbability(f64),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
