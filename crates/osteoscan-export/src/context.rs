use serde::Serialize;
use uuid::Uuid;

use osteoscan_core::models::analysis::{AnalysisStatus, XRayAnalysis};
use osteoscan_scoring::interpret::{readings, IndexReading, CLINICAL_INDICES, TEXTURE_INDICES};

use crate::error::ExportError;

/// One labelled value in the predictions table. Missing values are shown as
/// "n/a".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub name: &'static str,
    pub value: String,
}

/// Everything a report template can refer to. Values are pre-formatted so
/// templates never deal with nulls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContext {
    pub id: Uuid,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    pub region: &'static str,
    pub analysis_date: String,
    pub status: AnalysisStatus,
    pub held_for_review: bool,
    pub review_reasons: Vec<String>,
    pub risk_category: String,
    pub recommendation: String,
    pub predictions: Vec<Prediction>,
    pub clinical_indices: Vec<IndexReading>,
    pub texture_indices: Vec<IndexReading>,
    pub texture_analysis_method: Option<String>,
    pub preprocessing_applied: Option<String>,
    pub analysis_notes: Option<String>,
}

fn fmt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

fn fmt_signed(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:+.1}"))
}

impl ReportContext {
    /// Build the context for a completed or review-held analysis.
    pub fn from_analysis(analysis: &XRayAnalysis) -> Result<Self, ExportError> {
        let status = analysis.analysis_status;
        if !matches!(status, AnalysisStatus::Completed | AnalysisStatus::RequiresReview) {
            return Err(ExportError::NotReportable(status));
        }
        let findings = &analysis.findings;

        Ok(Self {
            id: analysis.id,
            patient_name: analysis.patient_name.clone(),
            patient_age: analysis.patient_age,
            patient_gender: analysis.patient_gender.to_string(),
            region: analysis.anatomical_region.label(),
            analysis_date: analysis.created_at.strftime("%Y-%m-%d").to_string(),
            status,
            held_for_review: status == AnalysisStatus::RequiresReview,
            review_reasons: analysis.review_reasons.clone(),
            risk_category: findings
                .osteoporosis_risk_category
                .map_or_else(|| "n/a".to_string(), |c| c.label().to_string()),
            recommendation: findings
                .dxa_recommendation
                .map_or_else(|| "n/a".to_string(), |r| r.label().to_string()),
            predictions: vec![
                Prediction {
                    name: "Predicted BMD (g/cm²)",
                    value: fmt(findings.predicted_bmd_gm_cm2, 3),
                },
                Prediction {
                    name: "T-score",
                    value: fmt_signed(findings.predicted_t_score),
                },
                Prediction {
                    name: "Z-score",
                    value: fmt_signed(findings.predicted_z_score),
                },
                Prediction {
                    name: "Texture entropy",
                    value: fmt(findings.texture_entropy, 2),
                },
                Prediction {
                    name: "Confidence",
                    value: findings
                        .confidence_score
                        .map_or_else(|| "n/a".to_string(), |c| format!("{c:.0}%")),
                },
            ],
            clinical_indices: readings(findings, &CLINICAL_INDICES),
            texture_indices: readings(findings, &TEXTURE_INDICES),
            texture_analysis_method: findings.texture_analysis_method.clone(),
            preprocessing_applied: findings.preprocessing_applied.clone(),
            analysis_notes: analysis
                .analysis_notes
                .clone()
                .filter(|n| !n.trim().is_empty()),
        })
    }
}
