use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub const DEFAULT_HISTORY_CAPACITY: usize = 20;
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

#[derive(Clone, Debug)]
pub struct BiteByteConfig {
    pub llm: LLMConfig,
    pub object_storage: ObjectStorageConfig,
    pub history_capacity: usize,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    /// Falls back to the provider's default model when absent.
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Replaces the built-in food instruction.
    pub food_prompt_template: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LLMProvider {
    #[default]
    OpenAI,
    Gemini,
}

impl LLMProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "openai",
            LLMProvider::Gemini => "gemini",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "gpt-4o",
            LLMProvider::Gemini => "gemini-2.0-flash",
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "gemini" => Ok(LLMProvider::Gemini),
            other => Err(format!("unknown LLM provider '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ObjectStorageConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub bucket: String,
    /// Base of the public image URLs; defaults to the endpoint.
    pub public_url: Option<String>,
}

impl ObjectStorageConfig {
    /// Storage is only used when both halves of the credential are present.
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.access_key) && present(&self.secret_key)
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let nanos = now.timestamp_subsec_nanos();
    let timestamp = Timestamp::from_unix(NoContext, seconds, nanos);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_requires_both_keys() {
        let mut config = ObjectStorageConfig {
            access_key: Some("minio".to_string()),
            ..Default::default()
        };
        assert!(!config.is_configured());

        config.secret_key = Some("  ".to_string());
        assert!(!config.is_configured());

        config.secret_key = Some("secret".to_string());
        assert!(config.is_configured());
    }

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("Gemini".parse::<LLMProvider>(), Ok(LLMProvider::Gemini));
        assert_eq!("openai".parse::<LLMProvider>(), Ok(LLMProvider::OpenAI));
        assert!("claude-ish".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn uuids_are_unique() {
        let a = generate_uuid_v7();
        let b = generate_uuid_v7();
        assert_ne!(a, b);
    }
}
