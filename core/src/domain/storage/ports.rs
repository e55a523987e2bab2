use std::future::Future;

use bytes::Bytes;

use crate::domain::common::entities::app_errors::CoreError;

/// Port for object storage operations (MinIO/S3)
pub trait ObjectStoragePort: Send + Sync {
    /// Upload an object and return its public URL
    fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Delete an object from storage
    fn delete_object(&self, object_key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}
