//! Uncertainty estimation via the trained error regressor.
//!
//! A boosted regressor ("errCBR") was fit on the mixed feature view to
//! predict the ensemble's own error. Its output is reported alongside the
//! risk figure, and `1 - uncertainty` is surfaced as a confidence score.

use std::sync::Arc;

use crate::domain::MixedView;
use crate::ports::{ModelInput, PredictionError};
use crate::registry::ModelRegistry;

/// Name of the registered error regressor the estimator consults.
pub const ERROR_MODEL: &str = "errCBR";

/// Scores the error regressor for a single encoded record.
#[derive(Clone)]
pub struct UncertaintyEstimator {
    registry: Arc<ModelRegistry>,
}

impl UncertaintyEstimator {
    /// Create an estimator over a loaded registry.
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Predicted error for this record, clamped below at zero.
    ///
    /// The regressor is unbounded above and its raw output is passed
    /// through unchanged when it exceeds 1; only negative predictions are
    /// floored. Callers deriving a confidence score from it should treat
    /// values above 1 as a degenerate region.
    ///
    /// # Errors
    /// Fails if the error regressor is missing from the registry or
    /// rejects the input.
    pub fn estimate(&self, mixed: &MixedView) -> Result<f64, PredictionError> {
        let model = self
            .registry
            .get(ERROR_MODEL)
            .ok_or_else(|| PredictionError::NotRegistered(ERROR_MODEL.to_string()))?;
        let raw = model.predict_scalar(&ModelInput::Mixed(mixed))?;
        Ok(raw.max(0.0))
    }
}
