use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{common::generate_timestamp, storage::entities::StoredImage};

pub const DEFAULT_ANALYSIS_TYPE: &str = "food";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub image_url: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub analysis_type: String,
    pub analysis_result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip)]
    pub image_object_key: Option<String>,
}

/// Identity of a record, fixed before its image is persisted so the object
/// key can embed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordStamp {
    pub id: Uuid,
    pub timestamp: i64,
}

impl RecordStamp {
    pub fn now() -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            timestamp: now.timestamp_millis(),
        }
    }
}

impl AnalysisRecord {
    pub fn new(
        stamp: RecordStamp,
        image: StoredImage,
        analysis_type: String,
        analysis_result: String,
    ) -> Self {
        Self {
            id: stamp.id,
            image_url: image.url,
            timestamp: stamp.timestamp,
            analysis_type,
            analysis_result,
            thumbnail_url: None,
            image_object_key: image.object_key,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.image_object_key.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisCategory {
    Food,
    UiUx,
    Security,
    Accessibility,
    Generic,
}

impl AnalysisCategory {
    pub const SELECTABLE: [AnalysisCategory; 4] = [
        AnalysisCategory::Food,
        AnalysisCategory::UiUx,
        AnalysisCategory::Security,
        AnalysisCategory::Accessibility,
    ];

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "food" | "meal" | "calories" => AnalysisCategory::Food,
            "ui-ux" | "ui/ux" | "ui_ux" | "uiux" | "ui" | "ux" => AnalysisCategory::UiUx,
            "security" => AnalysisCategory::Security,
            "accessibility" | "a11y" => AnalysisCategory::Accessibility,
            _ => AnalysisCategory::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisCategory::Food => "food",
            AnalysisCategory::UiUx => "ui-ux",
            AnalysisCategory::Security => "security",
            AnalysisCategory::Accessibility => "accessibility",
            AnalysisCategory::Generic => "generic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_and_hides_object_key() {
        let stamp = RecordStamp {
            id: Uuid::nil(),
            timestamp: 42,
        };
        let record = AnalysisRecord::new(
            stamp,
            StoredImage::remote("http://s3/b/k.jpg".to_string(), "k.jpg".to_string()),
            "food".to_string(),
            "Pad thai, 350 g, 600 kcal".to_string(),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["imageUrl"], "http://s3/b/k.jpg");
        assert_eq!(value["analysisType"], "food");
        assert_eq!(value["analysisResult"], "Pad thai, 350 g, 600 kcal");
        assert_eq!(value["timestamp"], 42);
        assert!(value.get("thumbnailUrl").is_none());
        assert!(value.get("imageObjectKey").is_none());
        assert!(record.is_remote());
    }

    #[test]
    fn labels_map_to_categories() {
        assert_eq!(AnalysisCategory::from_label(" Food "), AnalysisCategory::Food);
        assert_eq!(AnalysisCategory::from_label("UI/UX"), AnalysisCategory::UiUx);
        assert_eq!(AnalysisCategory::from_label("a11y"), AnalysisCategory::Accessibility);
        assert_eq!(AnalysisCategory::from_label("security"), AnalysisCategory::Security);
        assert_eq!(AnalysisCategory::from_label("plants"), AnalysisCategory::Generic);
    }

    #[test]
    fn stamps_are_distinct() {
        let a = RecordStamp::now();
        let b = RecordStamp::now();
        assert_ne!(a.id, b.id);
        assert!(b.timestamp >= a.timestamp);
    }
}
