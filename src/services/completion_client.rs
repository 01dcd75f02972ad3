use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Produces raw text from a chat prompt. Callers own any fallback when this fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiCompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
    has_key: bool,
}

impl OpenAiCompletionClient {
    pub fn new(api_key: &SecretString, model: &str, timeout: Duration) -> Self {
        let key = api_key.expose_secret();
        let client = Client::with_config(OpenAIConfig::new().with_api_key(key));

        Self {
            client,
            model: model.to_string(),
            timeout,
            has_key: !key.trim().is_empty(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.openai_api_key,
            &config.openai_model,
            Duration::from_secs(config.openai_timeout_secs),
        )
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        if !self.has_key {
            return Err(AppError::UpstreamError(
                "OPENAI_API_KEY is not configured".to_string(),
            ));
        }

        let body = json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let response: ChatCompletionResponse =
            tokio::time::timeout(self.timeout, self.client.chat().create_byot(body))
                .await
                .map_err(|_| {
                    AppError::UpstreamError(format!(
                        "completion timed out after {}s",
                        self.timeout.as_secs()
                    ))
                })??;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::UpstreamError("completion returned no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(ChatMessage::system("s").role, "system");
        assert_eq!(ChatMessage::user("u").role, "user");
        assert_eq!(ChatMessage::assistant("a").content, "a");
    }

    #[test]
    fn response_shape_parses() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"{\"questions\":[]}"}}]}"#,
        )
        .expect("should parse");
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("{\"questions\":[]}")
        );
    }

    #[actix_web::test]
    async fn missing_key_fails_without_a_network_call() {
        let client = OpenAiCompletionClient::new(
            &SecretString::from(String::new()),
            "gpt-test",
            Duration::from_secs(1),
        );
        let result = client
            .complete(CompletionRequest {
                messages: vec![ChatMessage::user("hello")],
                temperature: 0.7,
                max_tokens: 10,
            })
            .await;
        assert!(matches!(result, Err(AppError::UpstreamError(_))));
    }
}
