//! Risk tiers and their fixed clinical guidance text.

use risk_types::Probability;
use serde::Serialize;

/// Guidance block shown for high-risk results.
pub const HIGH_RISK_GUIDANCE: &str = "Immediate actions:
- Obtain fungal cultures together with serum G and GM tests
- Consider starting empirical antifungal therapy
- Assess immune status and underlying disease

Monitoring:
- Check infection markers daily
- Review whether indwelling catheters remain necessary
- Review the current antimicrobial regimen";

/// Guidance block shown for moderate-risk results.
pub const MODERATE_RISK_GUIDANCE: &str = "Further work-up:
- Order fungal laboratory investigations
- Assess immune status and underlying disease
- Re-check infection markers at regular intervals

Preventive measures:
- Review the appropriateness of current antimicrobial use
- Review whether indwelling catheters remain necessary
- Strengthen infection surveillance";

/// Guidance block shown for low-risk results.
pub const LOW_RISK_GUIDANCE: &str = "Routine management:
- Continue the current treatment plan
- Monitor infection markers for change
- Re-test promptly if symptoms worsen

Preventive advice:
- Use antimicrobials judiciously
- Avoid unnecessary catheter use
- Maintain good basic care";

/// Risk classification derived from the infection probability.
///
/// The thresholds are fixed properties of the deployed model, not
/// configuration: a probability above 0.5 is high risk, above 0.2 up to and
/// including 0.5 is moderate, and everything at or below 0.2 is low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Classifies a probability into its tier using the fixed thresholds.
    pub fn from_probability(probability: Probability) -> Self {
        let p = probability.value();
        if p > 0.5 {
            RiskTier::High
        } else if p > 0.2 {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    /// Wire/display form of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
        }
    }

    /// The fixed guidance block for this tier, returned verbatim.
    pub fn guidance(&self) -> &'static str {
        match self {
            RiskTier::Low => LOW_RISK_GUIDANCE,
            RiskTier::Moderate => MODERATE_RISK_GUIDANCE,
            RiskTier::High => HIGH_RISK_GUIDANCE,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
