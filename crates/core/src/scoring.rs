//! The risk scoring service: one patient record in, one assessment out.

use std::sync::Arc;

use mycorisk_model::{Classifier, GbtClassifier, ModelError, POSITIVE_CLASS};
use risk_types::Probability;
use serde::Serialize;

use crate::config::CoreConfig;
use crate::error::{ScoreError, ScoreResult};
use crate::record::{PatientRecord, FEATURE_COLUMNS};
use crate::tier::RiskTier;
use crate::validation::validate_record;

/// The result of one scoring call. Derived, never persisted.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct RiskAssessment {
    /// Probability of fungal infection assigned by the classifier.
    pub probability: Probability,
    /// Risk tier derived from the probability via the fixed thresholds.
    pub tier: RiskTier,
    /// The tier's guidance block, verbatim.
    pub guidance: &'static str,
}

/// Scores patient records against an injected classifier.
///
/// The classifier is loaded once and shared read-only, so one service value
/// can be used from any number of threads without locking. Each call is a
/// pure computation: no retries, no state, no side effects beyond the
/// read-only classifier evaluation.
pub struct ScoringService {
    classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for ScoringService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringService").finish_non_exhaustive()
    }
}

impl ScoringService {
    /// Creates a service around any classifier implementation.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Loads the gradient-boosted artifact configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::ModelUnavailable` if the artifact is missing,
    /// corrupt, or does not match the serving feature schema.
    pub fn load(config: &CoreConfig) -> ScoreResult<Self> {
        let classifier =
            GbtClassifier::load(config.model_artifact_path(), &FEATURE_COLUMNS)
                .map_err(ScoreError::ModelUnavailable)?;
        Ok(Self::new(Arc::new(classifier)))
    }

    /// Scores a single patient record.
    ///
    /// Validates every field against its domain (collecting all violations),
    /// assembles the feature row in training column order, obtains the
    /// positive-class probability from the classifier, and maps it onto a
    /// risk tier with the tier's guidance text.
    ///
    /// # Errors
    ///
    /// * `ScoreError::Validation` — one or more fields out of domain; the
    ///   classifier is not invoked.
    /// * `ScoreError::Inference` — the classifier call failed or returned an
    ///   unusable probability.
    pub fn score(&self, record: &PatientRecord) -> ScoreResult<RiskAssessment> {
        validate_record(record).map_err(ScoreError::Validation)?;

        let row = record.feature_row();
        let probabilities = self
            .classifier
            .predict_probability(&row)
            .map_err(ScoreError::Inference)?;

        let positive = probabilities[POSITIVE_CLASS];
        let probability = Probability::new(positive)
            .map_err(|_| ScoreError::Inference(ModelError::ImproperProbability(positive)))?;

        let tier = RiskTier::from_probability(probability);
        tracing::debug!(
            "scored record: probability={:.4} tier={}",
            probability.value(),
            tier
        );

        Ok(RiskAssessment {
            probability,
            tier,
            guidance: tier.guidance(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DiseaseType;
    use crate::tier::LOW_RISK_GUIDANCE;
    use mycorisk_model::ModelResult;
    use std::sync::Mutex;

    /// Stub returning a fixed positive-class probability.
    struct FixedClassifier(f64);

    impl Classifier for FixedClassifier {
        fn predict_probability(&self, _row: &[f64]) -> ModelResult<[f64; 2]> {
            Ok([1.0 - self.0, self.0])
        }
    }

    /// Stub that records the rows it was given.
    #[derive(Default)]
    struct RecordingClassifier {
        rows: Mutex<Vec<Vec<f64>>>,
    }

    impl Classifier for RecordingClassifier {
        fn predict_probability(&self, row: &[f64]) -> ModelResult<[f64; 2]> {
            self.rows.lock().unwrap().push(row.to_vec());
            Ok([0.9, 0.1])
        }
    }

    /// Stub that fails every call.
    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict_probability(&self, _row: &[f64]) -> ModelResult<[f64; 2]> {
            Err(ModelError::NonFiniteScore)
        }
    }

    fn baseline_record() -> PatientRecord {
        PatientRecord {
            wbc: 10.0,
            crp: 5.0,
            il6: 10.0,
            pct: 0.1,
            elderly: false,
            disease_type: DiseaseType::Others,
            fever_status: false,
            restricted_antimicrobial_use: false,
            urinary_catheterization: false,
            special_class_antimicrobial_use: false,
            antimicrobial_use: false,
            bacterial_infection: false,
            combination_antimicrobial_therapy: false,
            central_venous_catheter: false,
        }
    }

    #[test]
    fn test_low_risk_end_to_end() {
        let service = ScoringService::new(Arc::new(FixedClassifier(0.15)));

        let assessment = service.score(&baseline_record()).expect("should score");
        assert_eq!(assessment.probability.value(), 0.15);
        assert_eq!(assessment.tier, RiskTier::Low);
        assert_eq!(assessment.guidance, LOW_RISK_GUIDANCE);
    }

    #[test]
    fn test_threshold_boundaries() {
        let at_half = ScoringService::new(Arc::new(FixedClassifier(0.5)));
        assert_eq!(
            at_half.score(&baseline_record()).unwrap().tier,
            RiskTier::Moderate
        );

        let at_fifth = ScoringService::new(Arc::new(FixedClassifier(0.2)));
        assert_eq!(
            at_fifth.score(&baseline_record()).unwrap().tier,
            RiskTier::Low
        );

        let above_half = ScoringService::new(Arc::new(FixedClassifier(0.51)));
        assert_eq!(
            above_half.score(&baseline_record()).unwrap().tier,
            RiskTier::High
        );
    }

    #[test]
    fn test_score_is_deterministic() {
        let service = ScoringService::new(Arc::new(FixedClassifier(0.42)));
        let record = baseline_record();

        let first = service.score(&record).unwrap();
        let second = service.score(&record).unwrap();
        assert_eq!(first.probability, second.probability);
        assert_eq!(first.tier, second.tier);
        assert_eq!(first.guidance, second.guidance);
    }

    #[test]
    fn test_classifier_receives_training_column_order() {
        let classifier = Arc::new(RecordingClassifier::default());
        let service = ScoringService::new(classifier.clone());

        // Distinct laboratory values so any swap among the leading columns
        // is visible in the recorded row.
        let mut record = baseline_record();
        record.wbc = 12.5;
        record.crp = 7.0;
        record.il6 = 30.0;
        record.pct = 0.25;
        record.disease_type = DiseaseType::Urinary;
        service.score(&record).unwrap();

        let rows = classifier.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 14);
        // WBC, CRP, IL6, PCT, Elderly, Disease type lead the row.
        assert_eq!(rows[0][..6], [12.5, 7.0, 30.0, 0.25, 0.0, 10.0]);
    }

    #[test]
    fn test_each_flag_lands_on_its_own_column() {
        // Boolean columns all share the {0,1} domain, so order swaps are
        // probed one flag at a time: the single 1.0 must land exactly on the
        // flag's documented column.
        let flag_columns: [(usize, fn(&mut PatientRecord)); 9] = [
            (4, |r| r.elderly = true),
            (6, |r| r.fever_status = true),
            (7, |r| r.restricted_antimicrobial_use = true),
            (8, |r| r.urinary_catheterization = true),
            (9, |r| r.special_class_antimicrobial_use = true),
            (10, |r| r.antimicrobial_use = true),
            (11, |r| r.bacterial_infection = true),
            (12, |r| r.combination_antimicrobial_therapy = true),
            (13, |r| r.central_venous_catheter = true),
        ];

        for (column, set_flag) in flag_columns {
            let classifier = Arc::new(RecordingClassifier::default());
            let service = ScoringService::new(classifier.clone());

            let mut record = baseline_record();
            set_flag(&mut record);
            service.score(&record).unwrap();

            let rows = classifier.rows.lock().unwrap();
            for idx in [4, 6, 7, 8, 9, 10, 11, 12, 13] {
                let expected = if idx == column { 1.0 } else { 0.0 };
                assert_eq!(rows[0][idx], expected, "flag column {}", column);
            }
        }
    }

    #[test]
    fn test_validation_failure_skips_classifier() {
        let classifier = Arc::new(RecordingClassifier::default());
        let service = ScoringService::new(classifier.clone());

        let mut record = baseline_record();
        record.wbc = -1.0;
        let err = service.score(&record).expect_err("should reject");

        assert!(matches!(err, ScoreError::Validation(ref v) if v[0].field == "WBC"));
        assert!(classifier.rows.lock().unwrap().is_empty());
    }

    #[test]
    fn test_classifier_failure_is_inference_error() {
        let service = ScoringService::new(Arc::new(FailingClassifier));

        let err = service.score(&baseline_record()).expect_err("should fail");
        assert!(matches!(err, ScoreError::Inference(_)));
    }

    #[test]
    fn test_out_of_range_classifier_output_is_inference_error() {
        let service = ScoringService::new(Arc::new(FixedClassifier(1.5)));

        let err = service.score(&baseline_record()).expect_err("should fail");
        assert!(matches!(
            err,
            ScoreError::Inference(ModelError::ImproperProbability(_))
        ));
    }

    #[test]
    fn test_missing_artifact_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path().join("absent.json")).unwrap();

        let err = ScoringService::load(&config).expect_err("should fail");
        assert!(matches!(err, ScoreError::ModelUnavailable(_)));
    }

    #[test]
    fn test_corrupt_artifact_is_model_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ definitely not a model").unwrap();
        let config = CoreConfig::new(path).unwrap();

        let err = ScoringService::load(&config).expect_err("should fail");
        assert!(matches!(err, ScoreError::ModelUnavailable(_)));
    }
}
