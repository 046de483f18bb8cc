//! On-disk artifact format and evaluation for the gradient-boosted ensemble.
//!
//! The training pipeline serialises the fitted booster as a JSON document:
//! a schema version, the ordered feature column names, a base score and a
//! list of trees, each tree a flat node arena of splits and leaves. This
//! module deserialises that document, validates its structure once at load
//! time, and evaluates it deterministically.

use std::path::Path;

use serde::Deserialize;

use crate::{Classifier, ModelError, ModelResult};

/// The artifact schema version this build understands.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct ArtifactDoc {
    schema_version: u32,
    feature_names: Vec<String>,
    base_score: f64,
    trees: Vec<TreeDoc>,
}

#[derive(Debug, Deserialize)]
struct TreeDoc {
    nodes: Vec<NodeDoc>,
}

/// A node in the flat tree arena. Children are referenced by index and must
/// appear after their parent, which rules out cycles during evaluation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeDoc {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A loaded, structurally validated gradient-boosted tree classifier.
///
/// All node and feature indices are checked at load time, so evaluation is
/// a plain arena walk with no fallible indexing. The value is immutable
/// after load and safe to share across threads.
#[derive(Debug)]
pub struct GbtClassifier {
    base_score: f64,
    n_features: usize,
    trees: Vec<TreeDoc>,
}

impl GbtClassifier {
    /// Loads and validates a model artifact from `path`.
    ///
    /// `expected_columns` is the serving-time feature schema; the artifact's
    /// `feature_names` must match it verbatim, in order. Any mismatch, parse
    /// failure or structural defect is a load error, never a panic later.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` if the file cannot be read, does not parse,
    /// declares an unsupported schema version, disagrees with
    /// `expected_columns`, or contains an invalid tree structure.
    pub fn load(path: &Path, expected_columns: &[&str]) -> ModelResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(ModelError::ArtifactRead)?;
        let doc: ArtifactDoc =
            serde_json::from_str(&contents).map_err(ModelError::ArtifactParse)?;

        if doc.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(ModelError::UnsupportedSchemaVersion {
                found: doc.schema_version,
                supported: SUPPORTED_SCHEMA_VERSION,
            });
        }

        validate_feature_names(&doc.feature_names, expected_columns)?;

        if doc.trees.is_empty() {
            return Err(ModelError::MalformedEnsemble(
                "artifact contains no trees".into(),
            ));
        }
        for (tree_idx, tree) in doc.trees.iter().enumerate() {
            validate_tree(tree_idx, tree, expected_columns.len())?;
        }

        if !doc.base_score.is_finite() {
            return Err(ModelError::MalformedEnsemble(
                "base score is not finite".into(),
            ));
        }

        tracing::info!(
            "loaded gradient-boosted ensemble: {} trees, {} features (from {})",
            doc.trees.len(),
            doc.feature_names.len(),
            path.display()
        );

        Ok(Self {
            base_score: doc.base_score,
            n_features: doc.feature_names.len(),
            trees: doc.trees,
        })
    }

    /// Sums the raw margin contributed by every tree for `row`.
    fn margin(&self, row: &[f64]) -> f64 {
        let mut margin = self.base_score;
        for tree in &self.trees {
            let mut idx = 0;
            loop {
                match tree.nodes[idx] {
                    NodeDoc::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        idx = if row[feature] < threshold { left } else { right };
                    }
                    NodeDoc::Leaf { value } => {
                        margin += value;
                        break;
                    }
                }
            }
        }
        margin
    }
}

impl Classifier for GbtClassifier {
    fn predict_probability(&self, row: &[f64]) -> ModelResult<[f64; 2]> {
        if row.len() != self.n_features {
            return Err(ModelError::RowWidth {
                expected: self.n_features,
                found: row.len(),
            });
        }

        // Logistic link over the summed tree margins, positive class last.
        let margin = self.margin(row);
        let positive = 1.0 / (1.0 + (-margin).exp());
        if !positive.is_finite() {
            return Err(ModelError::NonFiniteScore);
        }

        Ok([1.0 - positive, positive])
    }
}

fn validate_feature_names(found: &[String], expected: &[&str]) -> ModelResult<()> {
    if found.len() != expected.len() {
        return Err(ModelError::FeatureMismatch(format!(
            "artifact has {} feature columns, serving schema has {}",
            found.len(),
            expected.len()
        )));
    }

    for (position, (artifact, serving)) in found.iter().zip(expected.iter()).enumerate() {
        if artifact != serving {
            return Err(ModelError::FeatureMismatch(format!(
                "column {} is '{}' in the artifact but '{}' in the serving schema",
                position, artifact, serving
            )));
        }
    }

    Ok(())
}

fn validate_tree(tree_idx: usize, tree: &TreeDoc, n_features: usize) -> ModelResult<()> {
    if tree.nodes.is_empty() {
        return Err(ModelError::MalformedEnsemble(format!(
            "tree {} has no nodes",
            tree_idx
        )));
    }

    for (node_idx, node) in tree.nodes.iter().enumerate() {
        match *node {
            NodeDoc::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if feature >= n_features {
                    return Err(ModelError::MalformedEnsemble(format!(
                        "tree {} node {} splits on unknown feature {}",
                        tree_idx, node_idx, feature
                    )));
                }
                if !threshold.is_finite() {
                    return Err(ModelError::MalformedEnsemble(format!(
                        "tree {} node {} has a non-finite threshold",
                        tree_idx, node_idx
                    )));
                }
                // Children must come after their parent in the arena; this
                // also guarantees the evaluation walk terminates.
                for child in [left, right] {
                    if child >= tree.nodes.len() || child <= node_idx {
                        return Err(ModelError::MalformedEnsemble(format!(
                            "tree {} node {} references invalid child {}",
                            tree_idx, node_idx, child
                        )));
                    }
                }
            }
            NodeDoc::Leaf { value } => {
                if !value.is_finite() {
                    return Err(ModelError::MalformedEnsemble(format!(
                        "tree {} node {} has a non-finite leaf value",
                        tree_idx, node_idx
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [&str; 2] = ["a", "b"];

    fn artifact_json() -> String {
        serde_json::json!({
            "schema_version": 1,
            "feature_names": ["a", "b"],
            "base_score": 0.0,
            "trees": [
                {
                    "nodes": [
                        { "feature": 0, "threshold": 1.0, "left": 1, "right": 2 },
                        { "value": -2.0 },
                        { "value": 2.0 }
                    ]
                }
            ]
        })
        .to_string()
    }

    fn write_artifact(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("model.json");
        std::fs::write(&path, contents).expect("write artifact");
        path
    }

    #[test]
    fn test_load_and_predict() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, &artifact_json());

        let model = GbtClassifier::load(&path, &COLUMNS).expect("should load");

        // Row below the split threshold lands on the -2.0 leaf.
        let [p0, p1] = model.predict_probability(&[0.5, 0.0]).unwrap();
        assert!((p1 - 1.0 / (1.0 + 2.0_f64.exp())).abs() < 1e-12);
        assert!((p0 + p1 - 1.0).abs() < 1e-12);

        // Row at or above the threshold lands on the +2.0 leaf.
        let [_, p1] = model.predict_probability(&[1.0, 0.0]).unwrap();
        assert!(p1 > 0.5);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, &artifact_json());
        let model = GbtClassifier::load(&path, &COLUMNS).unwrap();

        let first = model.predict_probability(&[0.5, 3.0]).unwrap();
        let second = model.predict_probability(&[0.5, 3.0]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = GbtClassifier::load(&path, &COLUMNS).expect_err("should fail");
        assert!(matches!(err, ModelError::ArtifactRead(_)));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, "not json at all");

        let err = GbtClassifier::load(&path, &COLUMNS).expect_err("should fail");
        assert!(matches!(err, ModelError::ArtifactParse(_)));
    }

    #[test]
    fn test_unsupported_schema_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let contents = artifact_json().replace("\"schema_version\":1", "\"schema_version\":2");
        let path = write_artifact(&dir, &contents);

        let err = GbtClassifier::load(&path, &COLUMNS).expect_err("should fail");
        assert!(matches!(
            err,
            ModelError::UnsupportedSchemaVersion {
                found: 2,
                supported: 1
            }
        ));
    }

    #[test]
    fn test_feature_name_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, &artifact_json());

        let err = GbtClassifier::load(&path, &["a", "c"]).expect_err("should fail");
        assert!(matches!(err, ModelError::FeatureMismatch(msg) if msg.contains("column 1")));
    }

    #[test]
    fn test_out_of_bounds_child_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let contents = serde_json::json!({
            "schema_version": 1,
            "feature_names": ["a", "b"],
            "base_score": 0.0,
            "trees": [
                {
                    "nodes": [
                        { "feature": 0, "threshold": 1.0, "left": 1, "right": 9 },
                        { "value": 0.0 }
                    ]
                }
            ]
        })
        .to_string();
        let path = write_artifact(&dir, &contents);

        let err = GbtClassifier::load(&path, &COLUMNS).expect_err("should fail");
        assert!(matches!(err, ModelError::MalformedEnsemble(msg) if msg.contains("child 9")));
    }

    #[test]
    fn test_backward_child_reference_rejected() {
        // A child pointing at or before its parent could loop forever.
        let dir = tempfile::tempdir().unwrap();
        let contents = serde_json::json!({
            "schema_version": 1,
            "feature_names": ["a", "b"],
            "base_score": 0.0,
            "trees": [
                {
                    "nodes": [
                        { "feature": 0, "threshold": 1.0, "left": 0, "right": 1 },
                        { "value": 0.0 }
                    ]
                }
            ]
        })
        .to_string();
        let path = write_artifact(&dir, &contents);

        let err = GbtClassifier::load(&path, &COLUMNS).expect_err("should fail");
        assert!(matches!(err, ModelError::MalformedEnsemble(_)));
    }

    #[test]
    fn test_row_width_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&dir, &artifact_json());
        let model = GbtClassifier::load(&path, &COLUMNS).unwrap();

        let err = model
            .predict_probability(&[1.0, 2.0, 3.0])
            .expect_err("should fail");
        assert!(matches!(
            err,
            ModelError::RowWidth {
                expected: 2,
                found: 3
            }
        ));
    }
}
