use axum::{
    Router,
    routing::{delete, get},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_image::{__path_analyze_image, analyze_image},
    delete_record::{__path_delete_record, delete_record},
    list_history::{__path_list_history, list_history},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_image, list_history, delete_record))]
pub struct AnalysisApiDoc;

pub fn analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/analyses", state.args.server.root_path),
            get(list_history).post(analyze_image),
        )
        .route(
            &format!("{}/analyses/{{record_id}}", state.args.server.root_path),
            delete(delete_record),
        )
}
