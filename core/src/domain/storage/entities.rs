use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Where the image of a record ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub url: String,
    /// Only set when the image lives in object storage.
    pub object_key: Option<String>,
}

impl StoredImage {
    pub fn remote(url: String, object_key: String) -> Self {
        Self {
            url,
            object_key: Some(object_key),
        }
    }

    pub fn local(url: String) -> Self {
        Self {
            url,
            object_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Images are uploaded to object storage.
    Remote,
    /// No storage credential; images are kept as inline data URLs.
    Local,
}

/// Outcome of the remote half of a record deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCleanup {
    NotApplicable,
    Deleted,
    Failed(String),
}

/// Storage problems that are reported but never fail the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWarning {
    Degraded {
        record_id: Uuid,
    },
    RemoteDeleteFailed {
        record_id: Uuid,
        object_key: String,
        reason: String,
    },
}

impl StorageWarning {
    pub fn code(&self) -> &'static str {
        match self {
            StorageWarning::Degraded { .. } => "storage_degraded",
            StorageWarning::RemoteDeleteFailed { .. } => "remote_delete_failed",
        }
    }

    pub fn emit(&self) {
        match self {
            StorageWarning::Degraded { record_id } => tracing::warn!(
                warning = self.code(),
                record_id = %record_id,
                "Object storage is not configured, keeping image as a local reference"
            ),
            StorageWarning::RemoteDeleteFailed {
                record_id,
                object_key,
                reason,
            } => tracing::warn!(
                warning = self.code(),
                record_id = %record_id,
                object_key = %object_key,
                reason = %reason,
                "Could not delete image from object storage, removing record anyway"
            ),
        }
    }
}
