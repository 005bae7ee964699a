//! List/filter queries over stored records.
//!
//! Both record stores load candidate records and hand them to [`PatientQuery::apply`]
//! or [`AnalysisQuery::apply`], so filtering and ordering are identical
//! whichever backend is in use.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::models::analysis::{AnalysisStatus, RiskCategory, XRayAnalysis};
use crate::models::patient::Patient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl PatientQuery {
    /// Filter, order newest first, then truncate to `limit`.
    pub fn apply(&self, mut patients: Vec<Patient>) -> Vec<Patient> {
        if let Some(term) = &self.search {
            patients.retain(|p| p.matches_search(term));
        }
        patients.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = self.limit {
            patients.truncate(limit);
        }
        patients
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisQuery {
    #[serde(default)]
    pub status: Option<AnalysisStatus>,
    #[serde(default)]
    pub risk_category: Option<RiskCategory>,
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl AnalysisQuery {
    /// Completed analyses, optionally narrowed to one risk category. This is
    /// what the report listing shows.
    pub fn reports(risk_category: Option<RiskCategory>) -> Self {
        Self {
            status: Some(AnalysisStatus::Completed),
            risk_category,
            ..Self::default()
        }
    }

    pub fn matches(&self, analysis: &XRayAnalysis) -> bool {
        if let Some(status) = self.status
            && analysis.analysis_status != status
        {
            return false;
        }
        if let Some(category) = self.risk_category
            && analysis.risk_category() != Some(category)
        {
            return false;
        }
        if let Some(patient_id) = self.patient_id
            && analysis.patient_id != Some(patient_id)
        {
            return false;
        }
        true
    }

    /// Filter, order newest first, then truncate to `limit`.
    pub fn apply(&self, mut analyses: Vec<XRayAnalysis>) -> Vec<XRayAnalysis> {
        analyses.retain(|a| self.matches(a));
        analyses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = self.limit {
            analyses.truncate(limit);
        }
        analyses
    }
}
