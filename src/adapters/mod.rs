//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the artifact sources and the per-family model
//! adapters deserialized from the exported parameter documents:
//! - `artifact`: filesystem and in-memory artifact sources
//! - `linear`: logistic regression and Platt-scaled SVM folds
//! - `bayes`: Gaussian naive Bayes folds
//! - `forest`: random forest folds and the dense boosting error regressor
//! - `boosted`: categorical-native boosted classifier folds and regressor

pub mod artifact;
pub mod bayes;
pub mod boosted;
pub mod forest;
pub mod linear;

pub use artifact::{ArtifactError, FileArtifactSource, MemoryArtifactSource};
