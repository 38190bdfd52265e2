//! Linear model family adapters: logistic regression and Platt-scaled SVM.
//!
//! Both families were exported from their training pipeline as plain
//! coefficient documents. The logistic folds score the full dummy-encoded
//! frame; the SVM folds score only the continuous columns through a
//! standard scaler, with Platt constants mapping the decision value to a
//! probability.

use serde::{Deserialize, Serialize};

use crate::ports::{dense_input, ensure_finite, Model, ModelInput, PredictionError};

/// Standard scaler parameters: `x_scaled = (x - mean) / std`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedScaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl ExportedScaler {
    fn apply(&self, features: &[f64], out: &mut Vec<f64>) {
        out.clear();
        for (i, &x) in features.iter().enumerate() {
            out.push((x - self.mean[i]) / self.std[i]);
        }
    }

    fn check_len(&self, n: usize) -> Result<(), String> {
        if self.mean.len() != n || self.std.len() != n {
            return Err(format!(
                "scaler lengths ({}, {}) do not match feature count {n}",
                self.mean.len(),
                self.std.len()
            ));
        }
        if self.std.iter().any(|&s| s == 0.0) {
            return Err("scaler std contains a zero".into());
        }
        Ok(())
    }
}

/// Logistic regression parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLinearModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<ExportedScaler>,
}

/// SVM parameters with Platt calibration constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedSvm {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub platt_a: f64,
    pub platt_b: f64,
    #[serde(default)]
    pub scaler: Option<ExportedScaler>,
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn dot(coefficients: &[f64], features: &[f64]) -> f64 {
    coefficients
        .iter()
        .zip(features.iter())
        .map(|(c, x)| c * x)
        .sum()
}

/// One logistic regression fold.
pub struct LogisticRegressionModel {
    name: String,
    params: ExportedLinearModel,
}

impl LogisticRegressionModel {
    /// Build the model, validating parameter shapes.
    ///
    /// # Errors
    /// Returns a shape description if lengths are inconsistent.
    pub fn new(name: impl Into<String>, params: ExportedLinearModel) -> Result<Self, String> {
        let n = params.feature_names.len();
        if params.coefficients.len() != n {
            return Err(format!(
                "coefficient count {} does not match feature count {n}",
                params.coefficients.len()
            ));
        }
        if let Some(scaler) = &params.scaler {
            scaler.check_len(n)?;
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
}

impl Model for LogisticRegressionModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_probability(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let features = dense_input(&self.name, input, self.feature_count())?;

        let decision = match &self.params.scaler {
            Some(scaler) => {
                let mut scaled = Vec::with_capacity(features.len());
                scaler.apply(features, &mut scaled);
                dot(&self.params.coefficients, &scaled) + self.params.intercept
            }
            None => dot(&self.params.coefficients, features) + self.params.intercept,
        };

        ensure_finite(&self.name, sigmoid(decision))
    }
}

/// One support vector machine fold.
///
/// The decision value is mapped to a probability through the Platt
/// constants fitted during training: `p = 1 / (1 + exp(a*d + b))`.
pub struct SvmModel {
    name: String,
    params: ExportedSvm,
}

impl SvmModel {
    /// Build the model, validating parameter shapes.
    ///
    /// # Errors
    /// Returns a shape description if lengths are inconsistent.
    pub fn new(name: impl Into<String>, params: ExportedSvm) -> Result<Self, String> {
        let n = params.feature_names.len();
        if params.coefficients.len() != n {
            return Err(format!(
                "coefficient count {} does not match feature count {n}",
                params.coefficients.len()
            ));
        }
        if let Some(scaler) = &params.scaler {
            scaler.check_len(n)?;
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
}

impl Model for SvmModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_probability(&self, input: &ModelInput<'_>) -> Result<f64, PredictionError> {
        let features = dense_input(&self.name, input, self.feature_count())?;

        let decision = match &self.params.scaler {
            Some(scaler) => {
                let mut scaled = Vec::with_capacity(features.len());
                scaler.apply(features, &mut scaled);
                dot(&self.params.coefficients, &scaled) + self.params.intercept
            }
            None => dot(&self.params.coefficients, features) + self.params.intercept,
        };

        let p = sigmoid(-(self.params.platt_a * decision + self.params.platt_b));
        ensure_finite(&self.name, p)
    }
}
