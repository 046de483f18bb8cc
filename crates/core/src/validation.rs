//! Domain validation for patient records.
//!
//! Laboratory values are the only fields that can go out of domain on a
//! constructed [`PatientRecord`]; booleans and the disease category are valid
//! by construction. Every violation is collected so a caller can surface all
//! bad fields in a single round trip.

use crate::error::FieldViolation;
use crate::record::PatientRecord;

/// Inclusive valid range for a laboratory value.
struct LabRange {
    field: &'static str,
    min: f64,
    max: f64,
}

const WBC_RANGE: LabRange = LabRange {
    field: "WBC",
    min: 0.0,
    max: 50.0,
};
const CRP_RANGE: LabRange = LabRange {
    field: "CRP",
    min: 0.0,
    max: 500.0,
};
const IL6_RANGE: LabRange = LabRange {
    field: "IL6",
    min: 0.0,
    max: 1000.0,
};
const PCT_RANGE: LabRange = LabRange {
    field: "PCT",
    min: 0.0,
    max: 100.0,
};

impl LabRange {
    fn check(&self, value: f64, violations: &mut Vec<FieldViolation>) {
        if !value.is_finite() {
            violations.push(FieldViolation {
                field: self.field,
                message: "value must be a finite number".into(),
            });
            return;
        }
        if value < self.min || value > self.max {
            violations.push(FieldViolation {
                field: self.field,
                message: format!(
                    "value {} is outside the valid range {}..={}",
                    value, self.min, self.max
                ),
            });
        }
    }
}

/// Validates every field of `record` against its declared domain.
///
/// # Errors
///
/// Returns the full list of violations; an empty result means the record is
/// safe to hand to the classifier.
pub fn validate_record(record: &PatientRecord) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    WBC_RANGE.check(record.wbc, &mut violations);
    CRP_RANGE.check(record.crp, &mut violations);
    IL6_RANGE.check(record.il6, &mut violations);
    PCT_RANGE.check(record.pct, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
