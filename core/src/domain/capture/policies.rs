use crate::domain::{capture::entities::ImageUpload, common::entities::app_errors::CoreError};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB
pub const ACCEPTED_MIME_PREFIX: &str = "image/";

/// Accepts only non-empty images of at most [`MAX_IMAGE_SIZE`] bytes.
/// Runs before any network call is made.
pub fn validate_upload(upload: &ImageUpload) -> Result<(), CoreError> {
    let mime_type = upload.mime_type.trim().to_ascii_lowercase();
    if !mime_type.starts_with(ACCEPTED_MIME_PREFIX) {
        return Err(CoreError::InvalidInput(
            "Please upload an image file".to_string(),
        ));
    }

    if upload.size() > MAX_IMAGE_SIZE {
        return Err(CoreError::InvalidInput(
            "File size exceeds 10MB limit".to_string(),
        ));
    }

    if upload.bytes.is_empty() {
        return Err(CoreError::InvalidInput("File cannot be empty".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(mime_type: &str, size: usize) -> ImageUpload {
        ImageUpload::new(vec![0u8; size], mime_type, "meal.jpg")
    }

    #[test]
    fn accepts_any_image_type_up_to_the_limit() {
        assert!(validate_upload(&upload("image/jpeg", 1)).is_ok());
        assert!(validate_upload(&upload("image/heic", 2048)).is_ok());
        assert!(validate_upload(&upload("IMAGE/PNG", MAX_IMAGE_SIZE)).is_ok());
    }

    #[test]
    fn rejects_non_image_types() {
        for mime_type in ["application/pdf", "text/plain", "", "video/mp4"] {
            assert!(matches!(
                validate_upload(&upload(mime_type, 10)),
                Err(CoreError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn rejects_oversized_files() {
        let err = validate_upload(&upload("image/jpeg", MAX_IMAGE_SIZE + 1)).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput("File size exceeds 10MB limit".to_string())
        );
    }

    #[test]
    fn rejects_empty_files() {
        assert!(matches!(
            validate_upload(&upload("image/jpeg", 0)),
            Err(CoreError::InvalidInput(_))
        ));
    }
}
