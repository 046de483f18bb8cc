//! The prediction capability injected into the scoring core.

use crate::ModelResult;

/// Index of the positive (infection) class in a two-class probability pair.
pub const POSITIVE_CLASS: usize = 1;

/// A binary classifier exposed as an opaque probability function.
///
/// Implementations take a feature row in the training-time column order and
/// return the class probability pair `[p_negative, p_positive]`, which must
/// sum to one. Implementations are required to be:
///
/// - **Deterministic**: identical rows yield identical outputs for the
///   lifetime of the loaded model.
/// - **Read-only and thread-safe**: the model is loaded once and never
///   mutated, so concurrent scoring needs no locking (`Send + Sync`).
///
/// The trait exists so the scoring service can be exercised against a
/// deterministic stub without any model file on disk.
pub trait Classifier: Send + Sync {
    /// Predicts the two-class probability pair for a single feature row.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` if the row width does not match the model or
    /// the underlying evaluation produces an unusable score.
    fn predict_probability(&self, row: &[f64]) -> ModelResult<[f64; 2]>;
}
