use crate::domain::{analysis::entities::DEFAULT_ANALYSIS_TYPE, capture::entities::ImageUpload};

#[derive(Debug, Clone)]
pub struct AnalyzeImageInput {
    pub image: ImageUpload,
    pub analysis_type: Option<String>,
}

impl AnalyzeImageInput {
    pub fn new(image: ImageUpload) -> Self {
        Self {
            image,
            analysis_type: None,
        }
    }

    pub fn with_analysis_type(mut self, analysis_type: impl Into<String>) -> Self {
        self.analysis_type = Some(analysis_type.into());
        self
    }

    /// The label stored on the record; blank or missing means food.
    pub fn resolved_analysis_type(&self) -> String {
        self.analysis_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ANALYSIS_TYPE)
            .to_string()
    }
}
