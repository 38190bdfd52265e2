//! Per-family contribution breakdown.
//!
//! Each of the ten weight slots is isolated by running the blend with a
//! basis weight vector that keeps only that slot's published weight. The
//! resulting ten normalized figures decompose the displayed risk exactly:
//! summing the table reproduces the headline number.

use crate::application::predictor::{EnsemblePredictor, ENSEMBLE_WEIGHTS};
use crate::application::risk::normalize;
use crate::domain::{
    ContributionTable, FamilyContribution, MixedView, OneHotView, PatientRecord,
};
use crate::ports::PredictionError;

/// Display names of the five model families, in slot-pair order.
pub const FAMILY_NAMES: [&str; 5] = [
    "Support Vector Machines",
    "Random Forest",
    "Logistic Regression",
    "Gradient-Boosted Trees",
    "Naive Bayes",
];

/// Builds the per-family contribution table for one record.
#[derive(Clone)]
pub struct AttributionReporter {
    predictor: EnsemblePredictor,
}

impl AttributionReporter {
    /// Create a reporter backed by the same predictor the headline uses.
    #[must_use]
    pub fn new(predictor: EnsemblePredictor) -> Self {
        Self { predictor }
    }

    /// Contribution of every (family, fold) slot in displayed risk points.
    ///
    /// Runs the full blend ten times, once per basis weight vector, so the
    /// table always reflects the same model outputs as the headline figure.
    ///
    /// # Errors
    /// Propagates any failing model call; a partial table is never
    /// returned.
    pub fn attribute(
        &self,
        one_hot: &OneHotView,
        mixed: &MixedView,
        record: &PatientRecord,
    ) -> Result<ContributionTable, PredictionError> {
        let mut slots = [0.0; 10];
        for (slot, out) in slots.iter_mut().enumerate() {
            let mut basis = [0.0; 10];
            basis[slot] = ENSEMBLE_WEIGHTS[slot];
            let raw = self.predictor.predict(one_hot, mixed, &basis)?;
            *out = normalize(raw, record);
        }

        let rows = FAMILY_NAMES
            .iter()
            .enumerate()
            .map(|(family, name)| FamilyContribution {
                family: (*name).to_string(),
                fold1: slots[family * 2],
                fold2: slots[family * 2 + 1],
            })
            .collect();

        Ok(ContributionTable { rows })
    }
}
