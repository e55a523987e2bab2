use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use bitebyte_core::domain::analysis::ports::AnalysisService;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::api_error::{ApiError, ApiErrorResponse},
    app_state::AppState,
};

#[utoipa::path(
    delete,
    path = "/{record_id}",
    tag = "analysis",
    summary = "Delete a record",
    params(
        ("record_id" = Uuid, Path, description = "Record id"),
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, body = ApiErrorResponse, description = "Record not found")
    )
)]
pub async fn delete_record(
    Path(record_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_record(record_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
