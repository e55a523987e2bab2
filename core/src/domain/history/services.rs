use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    analysis::{
        entities::{AnalysisRecord, RecordStamp},
        ports::LLMClient,
    },
    capture::entities::ImageUpload,
    common::{entities::app_errors::CoreError, services::Service},
    history::ports::{HistoryRepository, RecordStore},
    storage::{
        entities::{RemoteCleanup, StorageWarning, StoredImage},
        ports::ObjectStoragePort,
        value_objects::ObjectKey,
    },
};

impl<LLM, OS, HR> RecordStore for Service<LLM, OS, HR>
where
    LLM: LLMClient,
    OS: ObjectStoragePort,
    HR: HistoryRepository,
{
    #[instrument(skip(self, image, analysis_result), fields(filename = %image.filename))]
    async fn store_record(
        &self,
        image: ImageUpload,
        analysis_type: String,
        analysis_result: String,
    ) -> Result<AnalysisRecord, CoreError> {
        let stamp = RecordStamp::now();
        let stored_image = persist_image(self.object_storage.as_ref(), &stamp, &image).await?;

        let record = AnalysisRecord::new(stamp, stored_image, analysis_type, analysis_result);
        let evicted = self.history_repository.prepend(record.clone()).await?;

        for old in &evicted {
            tracing::debug!(record_id = %old.id, "Evicted oldest record from history");
        }

        tracing::info!(
            record_id = %record.id,
            remote = record.is_remote(),
            "Analysis record stored"
        );

        Ok(record)
    }

    async fn list_records(&self) -> Result<Vec<AnalysisRecord>, CoreError> {
        self.history_repository.list().await
    }

    #[instrument(skip(self))]
    async fn remove_record(&self, record_id: Uuid) -> Result<RemoteCleanup, CoreError> {
        let record = self
            .history_repository
            .get_by_id(record_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let cleanup = match (&record.image_object_key, &self.object_storage) {
            (Some(object_key), Some(storage)) => match storage.delete_object(object_key).await {
                Ok(()) => RemoteCleanup::Deleted,
                Err(e) => {
                    let reason = e.to_string();
                    StorageWarning::RemoteDeleteFailed {
                        record_id,
                        object_key: object_key.clone(),
                        reason: reason.clone(),
                    }
                    .emit();
                    RemoteCleanup::Failed(reason)
                }
            },
            _ => RemoteCleanup::NotApplicable,
        };

        // Local history wins over the storage backend.
        self.history_repository
            .remove(record_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        tracing::info!(record_id = %record_id, "Analysis record deleted");

        Ok(cleanup)
    }
}

/// Uploads the image when storage is configured, otherwise keeps it as an
/// inline data URL.
pub(crate) async fn persist_image<OS: ObjectStoragePort>(
    object_storage: Option<&OS>,
    stamp: &RecordStamp,
    image: &ImageUpload,
) -> Result<StoredImage, CoreError> {
    let Some(storage) = object_storage else {
        StorageWarning::Degraded {
            record_id: stamp.id,
        }
        .emit();
        return Ok(StoredImage::local(image.to_data_url()));
    };

    let object_key = ObjectKey::for_record(stamp.id, stamp.timestamp, &image.filename);
    let url = storage
        .put_object(object_key.as_str(), image.bytes.clone(), &image.mime_type)
        .await?;

    Ok(StoredImage::remote(url, object_key.into_string()))
}
