use bytes::Bytes;
use utoipa::ToSchema;
use validator::Validate;

/// Multipart body of `POST /analyses`.
#[derive(Debug, Default, ToSchema, Validate)]
pub struct AnalyzeImageForm {
    /// Image file; any `image/*` type up to 10MB.
    #[schema(value_type = String, format = Binary)]
    pub image: Bytes,

    #[validate(length(
        min = 1,
        max = 64,
        message = "analysis_type must be between 1 and 64 characters"
    ))]
    #[schema(example = "food")]
    pub analysis_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_type_length_is_bounded() {
        let form = |value: Option<&str>| AnalyzeImageForm {
            analysis_type: value.map(str::to_string),
            ..Default::default()
        };

        assert!(form(None).validate().is_ok());
        assert!(form(Some("ui-ux")).validate().is_ok());
        assert!(form(Some("")).validate().is_err());
        assert!(form(Some(&"x".repeat(65))).validate().is_err());
    }
}
