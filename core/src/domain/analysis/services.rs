use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    analysis::{
        entities::AnalysisRecord,
        ports::{AnalysisService, LLMClient},
        value_objects::AnalyzeImageInput,
    },
    capture::policies::validate_upload,
    common::{entities::app_errors::CoreError, services::Service},
    history::ports::{HistoryRepository, RecordStore},
    storage::ports::ObjectStoragePort,
};

impl<LLM, OS, HR> AnalysisService for Service<LLM, OS, HR>
where
    LLM: LLMClient,
    OS: ObjectStoragePort,
    HR: HistoryRepository,
{
    #[instrument(skip(self, input), fields(filename = %input.image.filename))]
    async fn analyze(&self, input: AnalyzeImageInput) -> Result<AnalysisRecord, CoreError> {
        // 1. Reject before any external call
        validate_upload(&input.image)?;

        // 2. Build instruction
        let analysis_type = input.resolved_analysis_type();
        let prompt = self.prompts.instruction(&analysis_type);

        tracing::info!(
            analysis_type = %analysis_type,
            size = input.image.size(),
            mime_type = %input.image.mime_type,
            "Starting image analysis"
        );

        // 3. Call LLM, exactly once
        let raw_response = self
            .llm_client
            .generate_with_image(
                prompt,
                input.image.bytes.clone(),
                input.image.mime_type.clone(),
            )
            .await
            .map_err(|e| match e {
                CoreError::AnalysisFailed(_) => e,
                other => CoreError::AnalysisFailed(other.to_string()),
            })?;

        let analysis_result = raw_response.trim();
        if analysis_result.is_empty() {
            tracing::error!("LLM returned an empty analysis");
            return Err(CoreError::AnalysisFailed(
                "the model returned an empty response".to_string(),
            ));
        }

        tracing::info!("Analysis completed successfully, storing result");

        // 4. Persist
        self.store_record(input.image, analysis_type, analysis_result.to_string())
            .await
    }

    async fn list_history(&self) -> Result<Vec<AnalysisRecord>, CoreError> {
        self.list_records().await
    }

    async fn delete_record(&self, record_id: Uuid) -> Result<(), CoreError> {
        self.remove_record(record_id).await.map(|_| ())
    }
}
