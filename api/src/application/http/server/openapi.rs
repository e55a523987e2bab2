use utoipa::OpenApi;

use crate::application::http::{
    analysis::router::AnalysisApiDoc,
    health::__path_live,
    server::config::__path_get_config,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BiteByte API",
        description = "Upload or capture a meal photo and get a calorie breakdown"
    ),
    paths(get_config, live),
    nest(
        (path = "/analyses", api = AnalysisApiDoc),
    )
)]
pub struct ApiDoc;
