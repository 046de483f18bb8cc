//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the
//! scoring service as a value. Environment variables are read only in the
//! binaries, never during request handling.

use std::path::{Path, PathBuf};

use mycorisk_model::ModelError;

use crate::error::{ScoreError, ScoreResult};

/// Default artifact location relative to the working directory.
pub const DEFAULT_MODEL_ARTIFACT: &str = "models/fungal-gbt.json";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    model_artifact_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(model_artifact_path: PathBuf) -> ScoreResult<Self> {
        if model_artifact_path.as_os_str().is_empty() {
            return Err(unavailable("model artifact path is empty"));
        }
        Ok(Self {
            model_artifact_path,
        })
    }

    pub fn model_artifact_path(&self) -> &Path {
        &self.model_artifact_path
    }
}

/// Resolve the model artifact path without reading environment variables.
///
/// If `override_path` is provided it must point at an existing file.
/// Otherwise this looks for [`DEFAULT_MODEL_ARTIFACT`] relative to the
/// current working directory and then walks up from `CARGO_MANIFEST_DIR`.
pub fn resolve_model_artifact_path(override_path: Option<PathBuf>) -> ScoreResult<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path);
        }
        return Err(unavailable(&format!(
            "model path override does not point at a file: {}",
            path.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_MODEL_ARTIFACT);
    if cwd_relative.is_file() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_MODEL_ARTIFACT);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(unavailable(&format!(
        "could not locate {} (set MYCORISK_MODEL_PATH to override)",
        DEFAULT_MODEL_ARTIFACT
    )))
}

fn unavailable(message: &str) -> ScoreError {
    ScoreError::ModelUnavailable(ModelError::ArtifactRead(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        message.to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_empty_path() {
        let err = CoreConfig::new(PathBuf::new()).expect_err("should reject");
        assert!(matches!(err, ScoreError::ModelUnavailable(_)));
    }

    #[test]
    fn test_resolve_accepts_existing_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{}").unwrap();

        let resolved = resolve_model_artifact_path(Some(path.clone())).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn test_resolve_rejects_missing_override() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_model_artifact_path(Some(dir.path().join("absent.json")))
            .expect_err("should reject");
        assert!(matches!(err, ScoreError::ModelUnavailable(_)));
    }
}
