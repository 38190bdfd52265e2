//! Assessment orchestration.
//!
//! Runs the full pipeline for one patient record: validation, encoding,
//! the ensemble blend, age normalization, session delta tracking,
//! uncertainty estimation, and the contribution breakdown.

use std::sync::Arc;

use crate::application::attribution::AttributionReporter;
use crate::application::predictor::{EnsemblePredictor, ENSEMBLE_WEIGHTS};
use crate::application::risk::{adjustment_factor, normalize};
use crate::application::uncertainty::UncertaintyEstimator;
use crate::domain::{uuid_v4, PatientRecord, RiskAssessment, SessionContext};
use crate::registry::ModelRegistry;
use crate::{Result, StrokeRiskError};

/// End-to-end stroke risk assessment over a loaded model registry.
pub struct AssessmentService {
    predictor: EnsemblePredictor,
    uncertainty: UncertaintyEstimator,
    reporter: AttributionReporter,
}

impl AssessmentService {
    /// Wire the pipeline stages around one shared registry.
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        let predictor = EnsemblePredictor::new(Arc::clone(&registry));
        Self {
            uncertainty: UncertaintyEstimator::new(registry),
            reporter: AttributionReporter::new(predictor.clone()),
            predictor,
        }
    }

    /// Assess one patient record, updating the session's previous-result
    /// tracking as a side effect.
    ///
    /// # Errors
    /// Returns a validation error listing every failed field check, or a
    /// prediction error if any registered model rejects the encoded input.
    pub fn assess(
        &self,
        record: &PatientRecord,
        session: &mut SessionContext,
    ) -> Result<RiskAssessment> {
        if let Err(problems) = record.validate() {
            return Err(StrokeRiskError::Validation(problems.join("; ")));
        }

        tracing::debug!("Step 1: Encoding patient record");
        let views = record.encode();

        tracing::debug!("Step 2: Blending ensemble probabilities");
        let probability = self
            .predictor
            .predict(&views.one_hot, &views.mixed, &ENSEMBLE_WEIGHTS)?;

        tracing::debug!("Step 3: Normalizing against age adjustment");
        let adjustment = adjustment_factor(record);
        let risk_percent = normalize(probability, record);

        tracing::debug!("Step 4: Estimating prediction uncertainty");
        let uncertainty = self.uncertainty.estimate(&views.mixed)?;

        tracing::debug!("Step 5: Building contribution breakdown");
        let contributions = self
            .reporter
            .attribute(&views.one_hot, &views.mixed, record)?;

        // All fallible stages are behind us; a failed request must leave
        // the session's previous-result state untouched.
        let delta_points = session.record(probability, adjustment);

        let assessment = RiskAssessment {
            id: uuid_v4(),
            probability,
            risk_percent,
            delta_points,
            uncertainty,
            confidence: 1.0 - uncertainty,
            contributions,
            bmi_category: record.bmi_category(),
            bmi_reliable: record.bmi_is_reliable(),
            created_at: chrono::Utc::now(),
        };

        tracing::info!(
            "Assessment {} complete: risk {:.2} (delta {:+.2}, uncertainty {:.3})",
            assessment.id,
            assessment.risk_percent,
            assessment.delta_points,
            assessment.uncertainty
        );

        Ok(assessment)
    }
}
