//! Risk assessment result types.
//!
//! Represents the output of one full ensemble pass: the blended risk
//! figure, its uncertainty, and the per-model contribution breakdown.

use serde::{Deserialize, Serialize};

use super::patient::BmiCategory;

/// Contribution of one model family, split by fold, in percentage points of
/// the displayed risk score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyContribution {
    /// Model family name (e.g. "Support Vector Machines")
    pub family: String,

    /// Fold 1 contribution in percentage points
    pub fold1: f64,

    /// Fold 2 contribution in percentage points
    pub fold2: f64,
}

/// Per-family, per-fold contribution table.
///
/// The ten entries sum to the displayed risk score; see
/// [`ContributionTable::total`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionTable {
    pub rows: Vec<FamilyContribution>,
}

impl ContributionTable {
    /// Sum of all fold contributions, in percentage points.
    ///
    /// Equals the normalized blended risk score within floating point
    /// tolerance (the attribution decomposition identity).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.fold1 + r.fold2).sum()
    }
}

/// Complete result of one assessment request.
///
/// Created fresh on every input change; never persisted beyond the
/// session's immediately previous result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Unique identifier
    pub id: String,

    /// Raw blended probability before risk-display rescaling
    pub probability: f64,

    /// Displayed risk score in percent, rescaled to population base rates
    pub risk_percent: f64,

    /// Change in the displayed score versus the session's previous result,
    /// in percentage points (0 on the first request)
    pub delta_points: f64,

    /// Predicted ensemble error, clamped below at 0. No upper clamp is
    /// applied; values above 1 pass through unmodified.
    pub uncertainty: f64,

    /// Confidence in the assessment, `1 - uncertainty`
    pub confidence: f64,

    /// Per-model contribution breakdown
    pub contributions: ContributionTable,

    /// BMI interpretation for the entered record
    pub bmi_category: BmiCategory,

    /// Whether the BMI interpretation is reliable at this age
    pub bmi_reliable: bool,

    /// Timestamp of the assessment
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Per-session state carried between requests for delta reporting.
///
/// Owned by the caller and passed explicitly into each assessment; the core
/// holds no hidden session state. Updated exactly once per request, after
/// the new result is computed.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Previous raw probability and its adjustment factor
    previous: Option<(f64, f64)>,
}

impl SessionContext {
    /// Create a fresh session with no previous result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this session has recorded a previous result.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Record this request's raw probability and adjustment factor and
    /// return the delta of the displayed score versus the previous request.
    ///
    /// The first call returns 0: the previous result defaults to the
    /// current one.
    pub fn record(&mut self, probability: f64, adjustment: f64) -> f64 {
        let current = probability * 100.0 / adjustment;
        let previous = self
            .previous
            .map_or(current, |(p, adjst)| p * 100.0 / adjst);
        self.previous = Some((probability, adjustment));
        current - previous
    }
}

/// Generate a simple UUID v4 (random) using CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy to ensure cryptographic randomness
/// on all platforms. This prevents UUID prediction attacks.
pub(crate) fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_delta_is_zero() {
        let mut session = SessionContext::new();
        let delta = session.record(0.04, 10000.0 / 401.0);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn test_delta_is_exact_difference_of_displayed_scores() {
        let mut session = SessionContext::new();
        let adjst1 = 10000.0 / 401.0;
        let adjst2 = 10000.0 / 501.0;
        session.record(0.04, adjst1);

        let delta = session.record(0.06, adjst2);
        let expected = 0.06 * 100.0 / adjst2 - 0.04 * 100.0 / adjst1;
        assert!((delta - expected).abs() < 1e-12);
    }

    #[test]
    fn test_contribution_total() {
        let table = ContributionTable {
            rows: vec![
                FamilyContribution {
                    family: "a".into(),
                    fold1: 0.1,
                    fold2: 0.2,
                },
                FamilyContribution {
                    family: "b".into(),
                    fold1: 0.3,
                    fold2: 0.4,
                },
            ],
        };
        assert!((table.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes
    }
}
