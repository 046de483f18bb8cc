/// Errors that can occur when creating validated probability values.
#[derive(Debug, thiserror::Error)]
pub enum ProbabilityError {
    /// The input was NaN or infinite
    #[error("Probability must be a finite number")]
    NotFinite,
    /// The input was outside the closed unit interval
    #[error("Probability {0} is outside [0.0, 1.0]")]
    OutOfRange(f64),
}

/// A floating-point value that is guaranteed to be a valid probability.
///
/// This type wraps an `f64` and ensures it is finite and lies within the
/// closed interval `[0.0, 1.0]`. It is the only probability representation
/// the scoring pipeline passes between crates.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    /// Creates a new `Probability` from the given value.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Probability)` if the value is finite and within `[0.0, 1.0]`,
    /// or a `ProbabilityError` describing why the value was rejected.
    pub fn new(value: f64) -> Result<Self, ProbabilityError> {
        if !value.is_finite() {
            return Err(ProbabilityError::NotFinite);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ProbabilityError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Renders the probability as a percentage with one decimal place,
    /// e.g. `0.15` becomes `"15.0%"`.
    pub fn as_percentage(&self) -> String {
        format!("{:.1}%", self.0 * 100.0)
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Probability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Probability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Probability::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_accepts_unit_interval() {
        assert!(Probability::new(0.0).is_ok());
        assert!(Probability::new(0.5).is_ok());
        assert!(Probability::new(1.0).is_ok());
    }

    #[test]
    fn test_probability_rejects_out_of_range() {
        let err = Probability::new(-0.01).expect_err("should reject negative");
        assert!(matches!(err, ProbabilityError::OutOfRange(_)));

        let err = Probability::new(1.01).expect_err("should reject above one");
        assert!(matches!(err, ProbabilityError::OutOfRange(_)));
    }

    #[test]
    fn test_probability_rejects_non_finite() {
        let err = Probability::new(f64::NAN).expect_err("should reject NaN");
        assert!(matches!(err, ProbabilityError::NotFinite));

        let err = Probability::new(f64::INFINITY).expect_err("should reject infinity");
        assert!(matches!(err, ProbabilityError::NotFinite));
    }

    #[test]
    fn test_as_percentage_formats_one_decimal() {
        let p = Probability::new(0.15).unwrap();
        assert_eq!(p.as_percentage(), "15.0%");

        let p = Probability::new(0.999).unwrap();
        assert_eq!(p.as_percentage(), "99.9%");
    }

    #[test]
    fn test_deserialize_validates() {
        let p: Probability = serde_json::from_str("0.42").unwrap();
        assert_eq!(p.value(), 0.42);

        assert!(serde_json::from_str::<Probability>("1.5").is_err());
    }
}
