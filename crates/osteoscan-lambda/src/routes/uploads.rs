use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use osteoscan_bedrock::AnalysisModel;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UploadParams {
    pub filename: Option<String>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub image_url: String,
}

/// Store a raw image body. The format comes from `Content-Type`, falling
/// back to the `filename` query parameter's extension.
pub async fn upload_image<M: AnalysisModel>(
    State(state): State<AppState<M>>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let image_url = state
        .intake
        .upload_image(body.to_vec(), content_type, params.filename.as_deref())
        .await?;
    Ok(Json(UploadResponse { image_url }))
}
