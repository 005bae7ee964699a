use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::analysis::{AnalysisStatus, RiskCategory, XRayAnalysis};

/// Number of recent analyses the dashboard summarises.
pub const DASHBOARD_ANALYSES: usize = 50;

/// Number of recent patients the dashboard summarises.
pub const DASHBOARD_PATIENTS: usize = 20;

/// Rounded percentage split of completed analyses. Severe osteoporosis is
/// counted with osteoporosis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationSplit {
    pub normal: u32,
    pub osteopenia: u32,
    pub osteoporosis: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    pub total_analyses: usize,
    pub total_patients: usize,
    pub processing_count: usize,
    pub requires_review_count: usize,
    pub classification: ClassificationSplit,
}

impl DashboardStats {
    pub fn compute(analyses: &[XRayAnalysis], total_patients: usize) -> Self {
        let count_status = |status: AnalysisStatus| {
            analyses
                .iter()
                .filter(|a| a.analysis_status == status)
                .count()
        };

        Self {
            total_analyses: analyses.len(),
            total_patients,
            processing_count: count_status(AnalysisStatus::Processing),
            requires_review_count: count_status(AnalysisStatus::RequiresReview),
            classification: classification_split(analyses),
        }
    }
}

fn classification_split(analyses: &[XRayAnalysis]) -> ClassificationSplit {
    let completed: Vec<_> = analyses
        .iter()
        .filter(|a| a.analysis_status == AnalysisStatus::Completed)
        .collect();
    if completed.is_empty() {
        return ClassificationSplit::default();
    }

    let (mut normal, mut osteopenia, mut osteoporosis) = (0usize, 0usize, 0usize);
    for analysis in &completed {
        match analysis.risk_category() {
            Some(RiskCategory::Normal) => normal += 1,
            Some(RiskCategory::Osteopenia) => osteopenia += 1,
            Some(RiskCategory::Osteoporosis | RiskCategory::SevereOsteoporosis) => {
                osteoporosis += 1
            }
            None => {}
        }
    }

    let total = completed.len() as f64;
    let percent = |n: usize| ((n as f64 / total) * 100.0).round() as u32;
    ClassificationSplit {
        normal: percent(normal),
        osteopenia: percent(osteopenia),
        osteoporosis: percent(osteoporosis),
    }
}
