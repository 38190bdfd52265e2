//! Model port: Trait for pretrained model inference.
//!
//! The registered artifacts belong to heterogeneous families with different
//! native call signatures. This trait abstracts them behind two capability
//! methods; each family implements the one it supports and rejects the
//! other.

use crate::domain::MixedView;

/// Error type for model inference.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Model '{model}' does not support {capability}")]
    UnsupportedCapability {
        model: String,
        capability: &'static str,
    },

    #[error("Feature count mismatch for model '{model}': got {got}, expected {expected}")]
    FeatureMismatch {
        model: String,
        got: usize,
        expected: usize,
    },

    #[error("Model '{model}' expects a {expected} input")]
    InputKindMismatch {
        model: String,
        expected: &'static str,
    },

    #[error("Model '{model}' references unknown feature '{feature}'")]
    UnknownFeature { model: String, feature: String },

    #[error("Model '{model}' produced a non-finite output")]
    NonFinite { model: String },

    #[error("Model '{0}' is not registered")]
    NotRegistered(String),
}

/// Input handed to a model for one inference call.
///
/// Dense inputs carry a numeric vector in the column order the model was
/// trained on; mixed inputs carry the categorical-native view.
#[derive(Debug, Clone, Copy)]
pub enum ModelInput<'a> {
    Dense(&'a [f64]),
    Mixed(&'a MixedView),
}

/// Trait for one pretrained model.
///
/// Implementations are immutable after construction and safe to share
/// across the process lifetime.
pub trait Model: Send + Sync {
    /// Registered name of this model (e.g. "svm1").
    fn name(&self) -> &str;

    /// Probability of the positive class for classifier families.
    ///
    /// # Errors
    /// Returns `PredictionError::UnsupportedCapability` for regressors, or
    /// an input error if the features do not match the training shape.
    fn predict_probability(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let _ = input;
        Err(PredictionError::UnsupportedCapability {
            model: self.name().to_string(),
            capability: "probability prediction",
        })
    }

    /// Scalar output for regressor families.
    ///
    /// # Errors
    /// Returns `PredictionError::UnsupportedCapability` for classifiers, or
    /// an input error if the features do not match the training shape.
    fn predict_scalar(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let _ = input;
        Err(PredictionError::UnsupportedCapability {
            model: self.name().to_string(),
            capability: "scalar prediction",
        })
    }
}

/// Reject non-finite model outputs instead of letting NaN flow into the
/// blended score.
pub(crate) fn ensure_finite(model: &str, value: f64) -> Result<f64, PredictionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PredictionError::NonFinite {
            model: model.to_string(),
        })
    }
}

/// Extract the dense vector from an input, checking its length.
pub(crate) fn dense_input<'a>(
    model: &str,
    input: &ModelInput<'a>,
    expected: usize,
) -> Result<&'a [f64], PredictionError> {
    match input {
        ModelInput::Dense(v) => {
            if v.len() == expected {
                Ok(v)
            } else {
                Err(PredictionError::FeatureMismatch {
                    model: model.to_string(),
                    got: v.len(),
                    expected,
                })
            }
        }
        ModelInput::Mixed(_) => Err(PredictionError::InputKindMismatch {
            model: model.to_string(),
            expected: "dense",
        }),
    }
}

/// Extract the mixed view from an input.
pub(crate) fn mixed_input<'a>(
    model: &str,
    input: &ModelInput<'a>,
) -> Result<&'a MixedView, PredictionError> {
    match input {
        ModelInput::Mixed(v) => Ok(v),
        ModelInput::Dense(_) => Err(PredictionError::InputKindMismatch {
            model: model.to_string(),
            expected: "mixed",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ProbabilityOnly;

    impl Model for ProbabilityOnly {
        fn name(&self) -> &str {
            "prob_only"
        }

        fn predict_probability(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
            let v = dense_input(self.name(), input, 2)?;
            Ok(v[0].min(1.0))
        }
    }

    #[test]
    fn test_default_capability_rejection() {
        let model = ProbabilityOnly;
        let features = [0.4, 0.6];
        let input = ModelInput::Dense(&features);

        assert!(model.predict_probability(&input).is_ok());
        let err = model.predict_scalar(&input).expect_err("must reject");
        assert!(matches!(
            err,
            PredictionError::UnsupportedCapability { .. }
        ));
    }

    #[test]
    fn test_dense_length_check() {
        let model = ProbabilityOnly;
        let features = [0.4];
        let err = model
            .predict_probability(&ModelInput::Dense(&features))
            .expect_err("must reject");
        assert!(matches!(
            err,
            PredictionError::FeatureMismatch {
                got: 1,
                expected: 2,
                ..
            }
        ));
    }
}
