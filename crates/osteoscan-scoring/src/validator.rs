use serde::{Deserialize, Serialize};
use ts_rs::TS;

use osteoscan_core::models::analysis::{
    AnalysisFindings, AnalysisStatus, AnatomicalRegion, DxaRecommendation, RiskCategory,
    XRayAnalysis,
};

use crate::applicability::validate_applicability;
use crate::error::{ValidationError, ValidationWarning};
use crate::fields::MeasureField;
use crate::measures::validate_always_required;
use crate::risk::{derive_risk_category_consistency, reconcile_recommendation};

/// Validates a model response for one anatomical region and derives the
/// status the record should be stored with.
///
/// Holds only operator policy, so one validator can serve any number of
/// concurrent submissions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisRecordValidator {
    confidence_floor: Option<f64>,
}

/// A response that passed every hard check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidatedAnalysis {
    /// The response with inapplicable indices nulled and the recommendation
    /// settled.
    pub findings: AnalysisFindings,
    pub risk_category: RiskCategory,
    pub recommendation: DxaRecommendation,
    pub warnings: Vec<ValidationWarning>,
    pub status: AnalysisStatus,
}

impl ValidatedAnalysis {
    /// Write the validated findings and derived status onto a stored record.
    pub fn apply_to(&self, record: &mut XRayAnalysis) {
        record.findings = self.findings.clone();
        record.analysis_status = self.status;
        record.review_reasons = self.warnings.iter().map(|w| w.to_string()).collect();
        record.failure_reason = None;
    }
}

impl AnalysisRecordValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records whose confidence score is below `floor` go to review.
    pub fn with_confidence_floor(mut self, floor: f64) -> Self {
        self.confidence_floor = Some(floor);
        self
    }

    pub fn confidence_floor(&self) -> Option<f64> {
        self.confidence_floor
    }

    pub fn validate(
        &self,
        region: AnatomicalRegion,
        findings: &AnalysisFindings,
    ) -> Result<ValidatedAnalysis, ValidationError> {
        let regional = validate_applicability(region, &findings.regional)?;
        let measures = validate_always_required(findings)?;
        let declared = findings
            .osteoporosis_risk_category
            .ok_or(ValidationError::Missing {
                field: MeasureField::OsteoporosisRiskCategory,
            })?;

        let mut warnings = Vec::new();
        warnings.extend(derive_risk_category_consistency(
            measures.predicted_t_score,
            declared,
        ));
        let (recommendation, mismatch) =
            reconcile_recommendation(declared, findings.dxa_recommendation);
        warnings.extend(mismatch);
        if let Some(floor) = self.confidence_floor
            && measures.confidence_score < floor
        {
            warnings.push(ValidationWarning::LowConfidence {
                confidence: measures.confidence_score,
                floor,
            });
        }

        let status = if warnings.is_empty() {
            AnalysisStatus::Completed
        } else {
            AnalysisStatus::RequiresReview
        };

        let mut normalized = findings.clone();
        normalized.regional = regional;
        normalized.dxa_recommendation = Some(recommendation);

        Ok(ValidatedAnalysis {
            findings: normalized,
            risk_category: declared,
            recommendation,
            warnings,
            status,
        })
    }

    /// Validate the findings already stored on a record. Running this on a
    /// record produced by [`ValidatedAnalysis::apply_to`] yields the same
    /// status.
    pub fn validate_record(
        &self,
        record: &XRayAnalysis,
    ) -> Result<ValidatedAnalysis, ValidationError> {
        self.validate(record.anatomical_region, &record.findings)
    }
}
