use std::future::Future;

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{
    analysis::{entities::AnalysisRecord, value_objects::AnalyzeImageInput},
    common::entities::app_errors::CoreError,
};

/// LLM Client trait for calling multimodal models
pub trait LLMClient: Send + Sync {
    /// Sends one instruction plus one image and returns the completion text.
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        mime_type: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// The operations the UI layer may invoke.
pub trait AnalysisService: Send + Sync {
    fn analyze(
        &self,
        input: AnalyzeImageInput,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;

    fn list_history(&self) -> impl Future<Output = Result<Vec<AnalysisRecord>, CoreError>> + Send;

    fn delete_record(&self, record_id: Uuid)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}
