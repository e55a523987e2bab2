use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::ports::LLMClient, capture::entities::encode_data_url,
    common::entities::app_errors::CoreError,
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAILLMClient {
    api_key: Option<String>,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl OpenAILLMClient {
    pub fn new(api_key: Option<String>, model_name: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            model_name,
            base_url: base_url
                .unwrap_or_else(|| OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client: Client::new(),
        }
    }

    fn build_request(&self, prompt: String, image_data: &[u8], mime_type: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: prompt },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: encode_data_url(mime_type, image_data),
                        },
                    },
                ],
            }],
        }
    }

    async fn call_chat_completions(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<String, CoreError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("OpenAI API key is not configured");
            CoreError::AnalysisFailed("LLM API key is not configured".to_string())
        })?;

        let url = format!("{}/chat/completions", self.base_url);

        tracing::info!(model = %self.model_name, "Calling OpenAI chat completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI API request failed: {}", e);
                CoreError::AnalysisFailed(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(CoreError::AnalysisFailed(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            CoreError::AnalysisFailed(format!("Failed to parse LLM response: {}", e))
        })?;

        extract_text(completion)
    }
}

fn extract_text(completion: ChatCompletionResponse) -> Result<String, CoreError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| CoreError::AnalysisFailed("No response from LLM".to_string()))
}

impl LLMClient for OpenAILLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image_data: Bytes,
        mime_type: String,
    ) -> Result<String, CoreError> {
        let request = self.build_request(prompt, &image_data, &mime_type);
        self.call_chat_completions(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_sends_text_then_image_data_url() {
        let client = OpenAILLMClient::new(Some("sk-test".into()), "gpt-4o".into(), None);
        let request = client.build_request("What is this?".into(), &[1, 2, 3], "image/jpeg");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "messages": [{
                    "role": "user",
                    "content": [
                        { "type": "text", "text": "What is this?" },
                        { "type": "image_url", "image_url": { "url": "data:image/jpeg;base64,AQID" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn null_content_is_an_error() {
        let completion: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();

        assert!(matches!(
            extract_text(completion),
            Err(CoreError::AnalysisFailed(_))
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenAILLMClient::new(None, "gpt-4o".into(), Some("http://localhost:8080/v1/".into()));
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }
}
