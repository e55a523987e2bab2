pub mod gemini_client;
pub mod openai_client;

use bytes::Bytes;

pub use gemini_client::GeminiLLMClient;
pub use openai_client::OpenAILLMClient;

use crate::domain::{
    analysis::ports::LLMClient,
    common::{LLMConfig, LLMProvider, entities::app_errors::CoreError},
};

/// Provider chosen at startup from [`LLMConfig`].
#[derive(Debug, Clone)]
pub enum LLMProviderClient {
    OpenAI(OpenAILLMClient),
    Gemini(GeminiLLMClient),
}

impl LLMProviderClient {
    pub fn from_config(config: &LLMConfig) -> Self {
        let model = config
            .model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| config.provider.default_model().to_string());
        let api_key = config.api_key.clone().filter(|k| !k.trim().is_empty());

        if api_key.is_none() {
            tracing::warn!(
                provider = config.provider.as_str(),
                "No LLM API key configured, analysis requests will fail"
            );
        }

        match config.provider {
            LLMProvider::OpenAI => LLMProviderClient::OpenAI(OpenAILLMClient::new(
                api_key,
                model,
                config.base_url.clone(),
            )),
            LLMProvider::Gemini => LLMProviderClient::Gemini(GeminiLLMClient::new(
                api_key,
                model,
                config.base_url.clone(),
            )),
        }
    }
}

impl LLMClient for LLMProviderClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        mime_type: String,
    ) -> Result<String, CoreError> {
        match self {
            LLMProviderClient::OpenAI(client) => {
                client.generate_with_image(prompt, image_data, mime_type).await
            }
            LLMProviderClient::Gemini(client) => {
                client.generate_with_image(prompt, image_data, mime_type).await
            }
        }
    }
}
