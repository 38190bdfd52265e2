//! Gaussian naive Bayes adapter.
//!
//! The two naive Bayes folds score only the continuous columns. Exported
//! parameters are the class priors and the per-class feature means and
//! variances fitted during training.

use serde::{Deserialize, Serialize};

use crate::ports::{dense_input, ensure_finite, Model, ModelInput, PredictionError};

/// Gaussian naive Bayes parameters exported by the training pipeline.
///
/// Index 0 is the negative class (no stroke), index 1 the positive class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedGaussianNb {
    pub feature_names: Vec<String>,
    pub class_prior: [f64; 2],
    pub theta: [Vec<f64>; 2],
    pub var: [Vec<f64>; 2],
}

/// One Gaussian naive Bayes fold.
pub struct GaussianNbModel {
    name: String,
    params: ExportedGaussianNb,
}

impl GaussianNbModel {
    /// Build the model, validating parameter shapes.
    ///
    /// # Errors
    /// Returns a shape description if lengths are inconsistent or a
    /// variance is not positive.
    pub fn new(name: impl Into<String>, params: ExportedGaussianNb) -> Result<Self, String> {
        let n = params.feature_names.len();
        for class in 0..2 {
            if params.theta[class].len() != n || params.var[class].len() != n {
                return Err(format!(
                    "class {class} parameter lengths do not match feature count {n}"
                ));
            }
            if params.var[class].iter().any(|&v| v <= 0.0) {
                return Err(format!("class {class} has a non-positive variance"));
            }
        }
        if params.class_prior.iter().any(|&p| p <= 0.0) {
            return Err("class priors must be positive".into());
        }
        Ok(Self {
            name: name.into(),
            params,
        })
    }

    /// Number of features this fold was trained on.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.params.feature_names.len()
    }

    fn joint_log_likelihood(&self, class: usize, features: &[f64]) -> f64 {
        let mut ll = self.params.class_prior[class].ln();
        for (i, &x) in features.iter().enumerate() {
            let mean = self.params.theta[class][i];
            let var = self.params.var[class][i];
            ll += -0.5 * (2.0 * std::f64::consts::PI * var).ln()
                - (x - mean).powi(2) / (2.0 * var);
        }
        ll
    }
}

impl Model for GaussianNbModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_probability(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let features = dense_input(&self.name, input, self.feature_count())?;

        let ll0 = self.joint_log_likelihood(0, features);
        let ll1 = self.joint_log_likelihood(1, features);

        // Normalize in log space to avoid underflow on extreme likelihoods.
        let max = ll0.max(ll1);
        let e0 = (ll0 - max).exp();
        let e1 = (ll1 - max).exp();

        ensure_finite(&self.name, e1 / (e0 + e1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symmetric_params() -> ExportedGaussianNb {
        ExportedGaussianNb {
            feature_names: vec!["age".into(), "avg_glucose_level".into(), "bmi".into()],
            class_prior: [0.5, 0.5],
            theta: [vec![30.0, 90.0, 20.0], vec![70.0, 180.0, 30.0]],
            var: [vec![100.0, 400.0, 25.0], vec![100.0, 400.0, 25.0]],
        }
    }

    #[test]
    fn test_posterior_moves_with_evidence() {
        let model = GaussianNbModel::new("nbc1", symmetric_params()).expect("valid shape");

        let young = [30.0, 90.0, 20.0];
        let old = [70.0, 180.0, 30.0];

        let p_young = model
            .predict_probability(&ModelInput::Dense(&young))
            .expect("should predict");
        let p_old = model
            .predict_probability(&ModelInput::Dense(&old))
            .expect("should predict");

        assert!(p_young < 0.5);
        assert!(p_old > 0.5);
    }

    #[test]
    fn test_midpoint_is_half_for_symmetric_classes() {
        let model = GaussianNbModel::new("nbc1", symmetric_params()).expect("valid shape");
        let mid = [50.0, 135.0, 25.0];
        let p = model
            .predict_probability(&ModelInput::Dense(&mid))
            .expect("should predict");
        assert!((p - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_input_does_not_underflow() {
        let model = GaussianNbModel::new("nbc1", symmetric_params()).expect("valid shape");
        let extreme = [100.0, 400.0, 45.0];
        let p = model
            .predict_probability(&ModelInput::Dense(&extreme))
            .expect("should predict");
        assert!(p.is_finite());
        assert!(p > 0.5);
    }

    #[test]
    fn test_shape_validation() {
        let mut params = symmetric_params();
        params.var[1] = vec![100.0, 0.0, 25.0];
        assert!(GaussianNbModel::new("nbc1", params).is_err());

        let mut params = symmetric_params();
        params.theta[0].pop();
        assert!(GaussianNbModel::new("nbc2", params).is_err());
    }
}
