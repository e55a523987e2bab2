use axum::extract::State;
use bitebyte_core::domain::{
    analysis::entities::{AnalysisCategory, DEFAULT_ANALYSIS_TYPE},
    capture::policies::{ACCEPTED_MIME_PREFIX, MAX_IMAGE_SIZE},
    storage::entities::StorageMode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

/// Client-side settings: what may be uploaded and how it will be stored.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ConfigResponse {
    pub accepted_mime_prefix: String,
    pub max_image_size: usize,
    pub analysis_types: Vec<AnalysisCategory>,
    pub default_analysis_type: String,
    pub storage_mode: StorageMode,
    pub history_capacity: usize,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Get client configuration",
    responses(
        (status = 200, body = ConfigResponse)
    ),
)]
pub async fn get_config(
    State(state): State<AppState>,
) -> Result<Response<ConfigResponse>, ApiError> {
    Ok(Response::OK(ConfigResponse {
        accepted_mime_prefix: ACCEPTED_MIME_PREFIX.to_string(),
        max_image_size: MAX_IMAGE_SIZE,
        analysis_types: AnalysisCategory::SELECTABLE.to_vec(),
        default_analysis_type: DEFAULT_ANALYSIS_TYPE.to_string(),
        storage_mode: state.service.storage_mode(),
        history_capacity: state.service.history_capacity(),
    }))
}
