//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (model artifacts, model
//! inference).

mod artifact;
mod model;

pub use artifact::ArtifactSource;
pub use model::{Model, ModelInput, PredictionError};

pub(crate) use model::{dense_input, ensure_finite, mixed_input};
