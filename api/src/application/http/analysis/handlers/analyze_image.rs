use axum::extract::{Multipart, State};
use bitebyte_core::domain::{
    analysis::{
        entities::AnalysisRecord, ports::AnalysisService, value_objects::AnalyzeImageInput,
    },
    capture::entities::ImageUpload,
};
use validator::Validate;

use crate::application::http::{
    analysis::validators::AnalyzeImageForm,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "analysis",
    summary = "Analyze an image",
    description = "Sends the image to the vision model once, stores the result and returns the new record",
    request_body(content = AnalyzeImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalysisRecord),
        (status = 400, body = ApiErrorResponse, description = "Not an image, empty or larger than 10MB"),
        (status = 502, body = ApiErrorResponse, description = "The model call failed")
    ),
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalysisRecord>, ApiError> {
    let mut form = AnalyzeImageForm::default();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "analysis_type" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read analysis_type: {}", e))
                })?;
                form.analysis_type = Some(value);
            }
            "image" => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                form.image = data.clone();
                image = Some(ImageUpload::new(data, mime_type, filename));
            }
            _ => {}
        }
    }

    form.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let image = image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let mut input = AnalyzeImageInput::new(image);
    if let Some(analysis_type) = form.analysis_type {
        input = input.with_analysis_type(analysis_type);
    }

    let record = state.service.analyze(input).await?;

    Ok(Response::OK(record))
}
