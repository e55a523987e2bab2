use axum::extract::State;
use bitebyte_core::domain::analysis::{entities::AnalysisRecord, ports::AnalysisService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ListHistoryResponse {
    pub data: Vec<AnalysisRecord>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "analysis",
    summary = "List recent analyses",
    description = "Returns the in-memory history, newest first",
    responses(
        (status = 200, body = ListHistoryResponse)
    ),
)]
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Response<ListHistoryResponse>, ApiError> {
    let data = state.service.list_history().await?;

    Ok(Response::OK(ListHistoryResponse { data }))
}
