use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use osteoscan_bedrock::AnalysisModel;
use osteoscan_core::models::analysis::{AnalysisStatus, AnalysisSubmission, XRayAnalysis};
use osteoscan_core::query::AnalysisQuery;
use osteoscan_scoring::ValidationWarning;
use osteoscan_storage::RecordStore;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_analyses<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<Vec<XRayAnalysis>>, ApiError> {
    Ok(Json(state.intake.store().list_analyses(&query).await?))
}

pub async fn get_analysis<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
) -> Result<Json<XRayAnalysis>, ApiError> {
    Ok(Json(state.intake.store().get_analysis(id).await?))
}

pub async fn submit_analysis<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Json(submission): Json<AnalysisSubmission>,
) -> Result<Json<XRayAnalysis>, ApiError> {
    Ok(Json(state.intake.submit(submission).await?))
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub reviewer: String,
}

pub async fn approve_analysis<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<XRayAnalysis>, ApiError> {
    if req.reviewer.trim().is_empty() {
        return Err(ApiError::BadRequest("reviewer must not be blank".to_string()));
    }
    Ok(Json(state.intake.approve_review(id, req.reviewer.trim()).await?))
}

#[derive(Serialize)]
pub struct RevalidationResponse {
    pub analysis: XRayAnalysis,
    pub warnings: Vec<ValidationWarning>,
    pub derived_status: AnalysisStatus,
    pub changed: bool,
}

pub async fn revalidate_analysis<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RevalidationResponse>, ApiError> {
    let outcome = state.intake.revalidate(id).await?;
    Ok(Json(RevalidationResponse {
        analysis: outcome.analysis,
        warnings: outcome.warnings,
        derived_status: outcome.derived_status,
        changed: outcome.changed,
    }))
}
