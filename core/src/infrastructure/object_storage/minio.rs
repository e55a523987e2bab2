use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{ObjectStorageConfig, entities::app_errors::CoreError},
    storage::{ports::ObjectStoragePort, value_objects::public_object_url},
};

#[derive(Clone)]
pub struct MinioObjectStorage {
    client: Client,
    bucket: String,
    public_url: String,
}

impl MinioObjectStorage {
    /// Fails when either credential half is missing; callers then run without
    /// remote storage.
    pub async fn new(config: ObjectStorageConfig) -> Result<Self, CoreError> {
        let (Some(access_key), Some(secret_key)) = (
            config.access_key.as_deref().filter(|k| !k.trim().is_empty()),
            config.secret_key.as_deref().filter(|k| !k.trim().is_empty()),
        ) else {
            return Err(CoreError::ObjectStorageError(
                "Object storage credentials are not configured".to_string(),
            ));
        };

        let credentials = Credentials::new(access_key, secret_key, None, None, "bitebyte");

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        let public_url = config
            .public_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(&endpoint)
            .trim_end_matches('/')
            .to_string();

        tracing::info!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing MinIO client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&endpoint)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
            public_url,
        })
    }
}

impl ObjectStoragePort for MinioObjectStorage {
    #[instrument(skip(self, payload))]
    async fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<String, CoreError> {
        let payload_size = payload.len();

        tracing::info!(
            bucket = %self.bucket,
            object_key = %object_key,
            size = payload_size,
            content_type = %content_type,
            "Uploading image to storage"
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .content_type(content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| {
                let error_msg = e.to_string();
                let error_kind = if error_msg.contains("dispatch failure") {
                    "HTTP client dispatch failure - check endpoint URL and network connectivity"
                } else if error_msg.contains("timeout") {
                    "Request timeout - check network connection and MinIO server status"
                } else {
                    "Unknown error"
                };

                tracing::error!(
                    error = %e,
                    error_kind = %error_kind,
                    bucket = %self.bucket,
                    object_key = %object_key,
                    payload_size = payload_size,
                    "Failed to upload image"
                );
                CoreError::ObjectStorageError(format!(
                    "Failed to upload image: {} ({})",
                    e, error_kind
                ))
            })?;

        let url = public_object_url(&self.public_url, &self.bucket, object_key);

        tracing::info!(object_key = %object_key, url = %url, "Image uploaded successfully");

        Ok(url)
    }

    #[instrument(skip(self))]
    async fn delete_object(&self, object_key: &str) -> Result<(), CoreError> {
        tracing::info!(
            bucket = %self.bucket,
            object_key = %object_key,
            "Deleting image from storage"
        );

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(object_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    object_key = %object_key,
                    "Failed to delete image"
                );
                CoreError::ObjectStorageError(format!("Failed to delete image: {}", e))
            })?;

        tracing::info!(object_key = %object_key, "Image deleted successfully");

        Ok(())
    }
}
