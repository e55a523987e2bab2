use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single image handed over by either the file picker or the camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub mime_type: String,
    pub filename: String,
}

impl ImageUpload {
    pub fn new(
        bytes: impl Into<Bytes>,
        mime_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            filename: filename.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn to_data_url(&self) -> String {
        encode_data_url(&self.mime_type, &self.bytes)
    }
}

pub fn encode_data_url(mime_type: &str, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(data)
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front camera.
    User,
    /// Back camera.
    #[default]
    Environment,
}

impl FacingMode {
    pub fn opposite(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRequest {
    pub facing: FacingMode,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl StreamRequest {
    pub fn new(facing: FacingMode) -> Self {
        Self {
            facing,
            ideal_width: 1920,
            ideal_height: 1080,
        }
    }
}

/// Opaque handle for a live video stream owned by a [`CameraDevice`](super::ports::CameraDevice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_mime_type() {
        let upload = ImageUpload::new(vec![1u8, 2, 3], "image/png", "dot.png");
        assert_eq!(upload.to_data_url(), "data:image/png;base64,AQID");
        assert_eq!(upload.size(), 3);
    }

    #[test]
    fn facing_mode_toggles() {
        assert_eq!(FacingMode::default(), FacingMode::Environment);
        assert_eq!(FacingMode::Environment.opposite(), FacingMode::User);
        assert_eq!(FacingMode::User.opposite(), FacingMode::Environment);
    }
}
