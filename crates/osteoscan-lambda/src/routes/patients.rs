use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use osteoscan_bedrock::AnalysisModel;
use osteoscan_core::models::patient::{Patient, PatientInput};
use osteoscan_core::query::PatientQuery;
use osteoscan_storage::RecordStore;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_patients<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(state.intake.store().list_patients(&query).await?))
}

pub async fn get_patient<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.intake.store().get_patient(id).await?))
}

pub async fn create_patient<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Json(input): Json<PatientInput>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.intake.register_patient(input).await?))
}

pub async fn update_patient<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Path(id): Path<Uuid>,
    Json(input): Json<PatientInput>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.intake.edit_patient(id, input).await?))
}
