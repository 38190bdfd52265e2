//! Ensemble predictor: the fixed two-fold weighted blend.
//!
//! Ten weighted probabilities from five model families, two independently
//! trained folds each. Each fold group is summed and divided by 2, then the
//! halves are added. Dividing by 2 instead of normalizing the weights to 1
//! is part of the published calibration and must not be "fixed"; the result
//! is a weighted sum, not a convex combination.

use std::sync::Arc;

use crate::domain::{MixedView, OneHotView};
use crate::ports::{ModelInput, PredictionError};
use crate::registry::ModelRegistry;

/// The fixed blending weights, one per (family, fold) slot.
///
/// Slot order: svm1, svm2, rf1, rf2, logit1, logit2, cb1, cb2, nbc1, nbc2.
/// Even slots form fold 1, odd slots fold 2.
pub const ENSEMBLE_WEIGHTS: [f64; 10] = [0.59, 0.11, 0.02, 0.08, 0.13, 0.50, 0.07, 0.26, 0.19, 0.05];

/// Artifact name backing each weight slot, in [`ENSEMBLE_WEIGHTS`] order.
pub const SLOT_MODELS: [&str; 10] = [
    "svm1", "svm2", "rf1", "rf2", "logit1", "logit2", "cb1", "cb2", "nbc1", "nbc2",
];

/// Blends the registered model probabilities into one raw risk figure.
#[derive(Clone)]
pub struct EnsemblePredictor {
    registry: Arc<ModelRegistry>,
}

impl EnsemblePredictor {
    /// Create a predictor over a loaded registry.
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Blend all ten weighted model outputs into one probability.
    ///
    /// Every model is scored on the view it was trained on: SVM and naive
    /// Bayes folds see only the continuous columns, the forest folds see
    /// the frame without `work_type_Never_worked`, the logistic folds see
    /// the full dummy frame, and the boosted folds see the mixed view.
    ///
    /// # Errors
    /// Any failing model call aborts the request; there is no partial
    /// ensemble result.
    pub fn predict(
        &self,
        one_hot: &OneHotView,
        mixed: &MixedView,
        weights: &[f64; 10],
    ) -> Result<f64, PredictionError> {
        let continuous = one_hot.continuous();
        let full = one_hot.to_vec();
        let trimmed = one_hot.without_never_worked();

        let p_svm1 = self.probability("svm1", &ModelInput::Dense(&continuous))?;
        let p_svm2 = self.probability("svm2", &ModelInput::Dense(&continuous))?;

        let p_nbc1 = self.probability("nbc1", &ModelInput::Dense(&continuous))?;
        let p_nbc2 = self.probability("nbc2", &ModelInput::Dense(&continuous))?;

        let p_rf1 = self.probability("rf1", &ModelInput::Dense(&trimmed))?;
        let p_rf2 = self.probability("rf2", &ModelInput::Dense(&trimmed))?;

        let p_logit1 = self.probability("logit1", &ModelInput::Dense(&full))?;
        let p_logit2 = self.probability("logit2", &ModelInput::Dense(&full))?;

        let p_cb1 = self.probability("cb1", &ModelInput::Mixed(mixed))?;
        let p_cb2 = self.probability("cb2", &ModelInput::Mixed(mixed))?;

        let fold1 = p_svm1 * weights[0]
            + p_rf1 * weights[2]
            + p_logit1 * weights[4]
            + p_cb1 * weights[6]
            + p_nbc1 * weights[8];
        let fold2 = p_svm2 * weights[1]
            + p_rf2 * weights[3]
            + p_logit2 * weights[5]
            + p_cb2 * weights[7]
            + p_nbc2 * weights[9];

        Ok(fold1 / 2.0 + fold2 / 2.0)
    }

    fn probability(&self, name: &str, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let model = self
            .registry
            .get(name)
            .ok_or_else(|| PredictionError::NotRegistered(name.to_string()))?;
        let p = model.predict_probability(input)?;
        tracing::trace!("Model '{}' probability: {:.6}", name, p);
        Ok(p)
    }
}
