use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use osteoscan_audit::{AuditAction, AuditEvent};
use osteoscan_bedrock::AnalysisModel;
use osteoscan_core::models::analysis::{AnatomicalRegion, RiskCategory, XRayAnalysis};
use osteoscan_core::query::AnalysisQuery;
use osteoscan_export::render_report;
use osteoscan_storage::RecordStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReportFilter {
    pub risk_category: Option<RiskCategory>,
}

#[derive(Serialize)]
pub struct ReportSummary {
    pub id: Uuid,
    pub patient_name: String,
    pub patient_age: u32,
    pub anatomical_region: AnatomicalRegion,
    pub risk_category: Option<RiskCategory>,
    pub predicted_t_score: Option<f64>,
    pub created_at: String,
}

impl From<XRayAnalysis> for ReportSummary {
    fn from(a: XRayAnalysis) -> Self {
        Self {
            id: a.id,
            risk_category: a.risk_category(),
            predicted_t_score: a.findings.predicted_t_score,
            patient_name: a.patient_name,
            patient_age: a.patient_age,
            anatomical_region: a.anatomical_region,
            created_at: a.created_at.to_string(),
        }
    }
}

/// Completed analyses, newest first, optionally narrowed to one category.
pub async fn list_reports<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<Vec<ReportSummary>>, ApiError> {
    let analyses = state
        .intake
        .store()
        .list_analyses(&AnalysisQuery::reports(filter.risk_category))
        .await?;
    Ok(Json(analyses.into_iter().map(ReportSummary::from).collect()))
}

/// Render the Markdown report of one analysis.
pub async fn render_analysis_report<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let analysis = state.intake.store().get_analysis(id).await?;
    let rendered = render_report(&analysis, None)?;
    AuditEvent::new(AuditAction::ReportRendered, id).emit();
    Ok(([(CONTENT_TYPE, "text/markdown; charset=utf-8")], rendered))
}
