use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::patient::Gender;

/// Anatomical region shown on the uploaded X-ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnatomicalRegion {
    ProximalFemur,
    Calcaneus,
    Clavicle,
    LumbarSpine,
}

impl AnatomicalRegion {
    pub const ALL: [AnatomicalRegion; 4] = [
        AnatomicalRegion::ProximalFemur,
        AnatomicalRegion::Calcaneus,
        AnatomicalRegion::Clavicle,
        AnatomicalRegion::LumbarSpine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnatomicalRegion::ProximalFemur => "proximal_femur",
            AnatomicalRegion::Calcaneus => "calcaneus",
            AnatomicalRegion::Clavicle => "clavicle",
            AnatomicalRegion::LumbarSpine => "lumbar_spine",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnatomicalRegion::ProximalFemur => "Proximal Femur",
            AnatomicalRegion::Calcaneus => "Calcaneus",
            AnatomicalRegion::Clavicle => "Clavicle",
            AnatomicalRegion::LumbarSpine => "Lumbar Spine",
        }
    }
}

impl fmt::Display for AnatomicalRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WHO-style osteoporosis risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskCategory {
    Normal,
    Osteopenia,
    Osteoporosis,
    SevereOsteoporosis,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Normal,
        RiskCategory::Osteopenia,
        RiskCategory::Osteoporosis,
        RiskCategory::SevereOsteoporosis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Normal => "normal",
            RiskCategory::Osteopenia => "osteopenia",
            RiskCategory::Osteoporosis => "osteoporosis",
            RiskCategory::SevereOsteoporosis => "severe_osteoporosis",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Normal => "Normal",
            RiskCategory::Osteopenia => "Osteopenia",
            RiskCategory::Osteoporosis => "Osteoporosis",
            RiskCategory::SevereOsteoporosis => "Severe Osteoporosis",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Follow-up recommendation attached to a screening result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DxaRecommendation {
    RoutineMonitoring,
    #[serde(rename = "follow_up_6_months")]
    FollowUp6Months,
    ImmediateDxaRecommended,
    ClinicalInterventionNeeded,
}

impl DxaRecommendation {
    pub const ALL: [DxaRecommendation; 4] = [
        DxaRecommendation::RoutineMonitoring,
        DxaRecommendation::FollowUp6Months,
        DxaRecommendation::ImmediateDxaRecommended,
        DxaRecommendation::ClinicalInterventionNeeded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DxaRecommendation::RoutineMonitoring => "routine_monitoring",
            DxaRecommendation::FollowUp6Months => "follow_up_6_months",
            DxaRecommendation::ImmediateDxaRecommended => "immediate_dxa_recommended",
            DxaRecommendation::ClinicalInterventionNeeded => "clinical_intervention_needed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DxaRecommendation::RoutineMonitoring => "Routine monitoring",
            DxaRecommendation::FollowUp6Months => "Follow-up in 6 months",
            DxaRecommendation::ImmediateDxaRecommended => "Immediate DXA scan recommended",
            DxaRecommendation::ClinicalInterventionNeeded => "Clinical intervention needed",
        }
    }
}

impl fmt::Display for DxaRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an analysis record. Drives visibility in report listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnalysisStatus {
    #[default]
    Processing,
    Completed,
    Failed,
    RequiresReview,
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Completed => "completed",
            AnalysisStatus::Failed => "failed",
            AnalysisStatus::RequiresReview => "requires_review",
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The region-conditional indices. Which of them may be non-null depends on
/// the anatomical region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegionalIndices {
    #[serde(default)]
    pub singh_index: Option<f64>,
    #[serde(default)]
    pub jhamaria_index: Option<f64>,
    #[serde(default)]
    pub cortical_thickness_mm: Option<f64>,
}

/// The payload returned by the external analysis model.
///
/// Every field is optional at the parsing layer so that an incomplete
/// response surfaces as a validation failure naming the missing field rather
/// than as an opaque parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisFindings {
    #[serde(flatten)]
    pub regional: RegionalIndices,
    #[serde(default)]
    pub texture_contrast: Option<f64>,
    #[serde(default)]
    pub texture_homogeneity: Option<f64>,
    #[serde(default)]
    pub texture_energy: Option<f64>,
    #[serde(default)]
    pub texture_entropy: Option<f64>,
    #[serde(default)]
    pub fractal_dimension: Option<f64>,
    #[serde(default)]
    pub predicted_bmd_gm_cm2: Option<f64>,
    #[serde(default)]
    pub predicted_t_score: Option<f64>,
    #[serde(default)]
    pub predicted_z_score: Option<f64>,
    #[serde(default)]
    pub osteoporosis_risk_category: Option<RiskCategory>,
    #[serde(default)]
    pub dxa_recommendation: Option<DxaRecommendation>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub texture_analysis_method: Option<String>,
    #[serde(default)]
    pub preprocessing_applied: Option<String>,
}

/// What the submitting user provides for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisSubmission {
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: Gender,
    pub anatomical_region: AnatomicalRegion,
    pub image_url: String,
    #[serde(default)]
    pub analysis_notes: Option<String>,
}

/// One analysis of one uploaded image. Serialized flat: every finding is a
/// top-level key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct XRayAnalysis {
    pub id: Uuid,
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: Gender,
    pub image_url: String,
    pub anatomical_region: AnatomicalRegion,
    #[serde(flatten)]
    pub findings: AnalysisFindings,
    #[serde(default)]
    pub analysis_notes: Option<String>,
    #[serde(default)]
    pub analysis_status: AnalysisStatus,
    #[serde(default)]
    pub review_reasons: Vec<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    /// Set when an operator approves a record that was held for review.
    #[serde(default)]
    pub reviewed_at: Option<jiff::Timestamp>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl XRayAnalysis {
    /// A fresh record in the `processing` state, before the model is called.
    pub fn processing(submission: AnalysisSubmission, now: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id: submission.patient_id,
            patient_name: submission.patient_name.trim().to_string(),
            patient_age: submission.patient_age,
            patient_gender: submission.patient_gender,
            image_url: submission.image_url,
            anatomical_region: submission.anatomical_region,
            findings: AnalysisFindings::default(),
            analysis_notes: submission.analysis_notes,
            analysis_status: AnalysisStatus::Processing,
            review_reasons: Vec::new(),
            failure_reason: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn risk_category(&self) -> Option<RiskCategory> {
        self.findings.osteoporosis_risk_category
    }

    /// Mark the record failed. Findings from the failed attempt are dropped.
    pub fn fail(&mut self, reason: impl Into<String>, now: jiff::Timestamp) {
        self.findings = AnalysisFindings::default();
        self.analysis_status = AnalysisStatus::Failed;
        self.review_reasons.clear();
        self.failure_reason = Some(reason.into());
        self.updated_at = now;
    }
}
