//! Application layer orchestrating the domain logic through the ports.

pub mod assessment;
pub mod attribution;
pub mod predictor;
pub mod risk;
pub mod uncertainty;

pub use assessment::AssessmentService;
pub use attribution::{AttributionReporter, FAMILY_NAMES};
pub use predictor::{EnsemblePredictor, ENSEMBLE_WEIGHTS, SLOT_MODELS};
pub use risk::{adjustment_factor, normalize, CHILD_ADJUSTMENT};
pub use uncertainty::{UncertaintyEstimator, ERROR_MODEL};
