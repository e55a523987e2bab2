use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    analysis::entities::AnalysisRecord,
    capture::entities::ImageUpload,
    common::entities::app_errors::CoreError,
    storage::entities::RemoteCleanup,
};

/// Bounded, newest-first collection of analysis records.
pub trait HistoryRepository: Send + Sync {
    fn capacity(&self) -> usize;

    /// Inserts at the front and returns whatever fell off the back.
    fn prepend(
        &self,
        record: AnalysisRecord,
    ) -> impl Future<Output = Result<Vec<AnalysisRecord>, CoreError>> + Send;

    fn list(&self) -> impl Future<Output = Result<Vec<AnalysisRecord>, CoreError>> + Send;

    fn get_by_id(
        &self,
        record_id: Uuid,
    ) -> impl Future<Output = Result<Option<AnalysisRecord>, CoreError>> + Send;

    fn remove(
        &self,
        record_id: Uuid,
    ) -> impl Future<Output = Result<Option<AnalysisRecord>, CoreError>> + Send;
}

/// Persists analysis results together with their image.
pub trait RecordStore: Send + Sync {
    fn store_record(
        &self,
        image: ImageUpload,
        analysis_type: String,
        analysis_result: String,
    ) -> impl Future<Output = Result<AnalysisRecord, CoreError>> + Send;

    fn list_records(&self) -> impl Future<Output = Result<Vec<AnalysisRecord>, CoreError>> + Send;

    fn remove_record(
        &self,
        record_id: Uuid,
    ) -> impl Future<Output = Result<RemoteCleanup, CoreError>> + Send;
}
