use axum::extract::State;
use axum::Json;

use osteoscan_bedrock::AnalysisModel;
use osteoscan_core::query::{AnalysisQuery, PatientQuery};
use osteoscan_core::stats::{DashboardStats, DASHBOARD_ANALYSES, DASHBOARD_PATIENTS};
use osteoscan_storage::RecordStore;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn dashboard<M: AnalysisModel>(
    State(state): State<AppState<M>>,
) -> Result<Json<DashboardStats>, ApiError> {
    let store = state.intake.store();
    let analyses = store
        .list_analyses(&AnalysisQuery {
            limit: Some(DASHBOARD_ANALYSES),
            ..AnalysisQuery::default()
        })
        .await?;
    let patients = store
        .list_patients(&PatientQuery {
            search: None,
            limit: Some(DASHBOARD_PATIENTS),
        })
        .await?;
    Ok(Json(DashboardStats::compute(&analyses, patients.len())))
}
