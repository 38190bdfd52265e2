//! # Strokerisk
//!
//! Stroke risk assessment core: a fixed ensemble of pretrained statistical
//! models blended into one calibrated risk figure.
//!
//! This crate provides:
//! - Loading of the 12 frozen model artifacts into an immutable registry
//! - Deterministic encoding of one patient record into the feature views
//!   the model families were trained on
//! - The two-fold weighted ensemble, risk normalization, uncertainty
//!   estimation and per-model attribution
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientRecord, feature views, RiskAssessment)
//! - `ports`: Trait definitions for external operations (models, artifact bytes)
//! - `adapters`: Concrete implementations (artifact sources, model families)
//! - `registry`: The loaded-once, process-lifetime model set
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use application::{AssessmentService, EnsemblePredictor, ENSEMBLE_WEIGHTS};
pub use domain::{PatientRecord, RiskAssessment, SessionContext};
pub use registry::ModelRegistry;

/// Result type for strokerisk operations
pub type Result<T> = std::result::Result<T, StrokeRiskError>;

/// Main error type for strokerisk
#[derive(Debug, thiserror::Error)]
pub enum StrokeRiskError {
    #[error("Model loading failed: {0}")]
    Load(#[from] registry::ModelLoadError),

    #[error("Unrecognized patient category: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Prediction failed: {0}")]
    Prediction(#[from] ports::PredictionError),

    #[error("Invalid patient data: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
