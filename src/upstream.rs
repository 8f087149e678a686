use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

const ROLE_USER: &str = "user";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("upstream response contained no choices")]
    NoChoices,
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: [CompletionMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct CompletionMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoiceMessage {
    pub content: String,
}

impl<'a> CompletionRequest<'a> {
    pub fn single_user_message(model: &'a str, content: &'a str) -> Self {
        Self {
            model,
            messages: [CompletionMessage {
                role: ROLE_USER,
                content,
            }],
        }
    }
}

impl CompletionResponse {
    pub fn into_first_content(self) -> Result<String, UpstreamError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(UpstreamError::NoChoices)
    }
}

/// Chat-completion client for the configured upstream. Cloning is cheap and
/// shares the underlying connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
}

impl UpstreamClient {
    pub fn new(http: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            http,
            url: config.upstream_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `chat_input` as the only user message and returns the first
    /// choice's content.
    pub async fn complete(&self, chat_input: &str) -> Result<String, UpstreamError> {
        let payload = CompletionRequest::single_user_message(&self.model, chat_input);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let completion: CompletionResponse = serde_json::from_slice(&body)?;
        completion.into_first_content()
    }
}

impl fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_model_and_single_user_message() {
        let payload =
            CompletionRequest::single_user_message("meta-llama/Llama-3.1-8B-Instruct", "hello");
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "model": "meta-llama/Llama-3.1-8B-Instruct",
                "messages": [{ "role": "user", "content": "hello" }]
            })
        );
    }

    #[test]
    fn first_choice_content_is_returned_verbatim() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  hi there\n"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let completion: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(completion.into_first_content().unwrap(), "  hi there\n");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let completion: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            completion.into_first_content(),
            Err(UpstreamError::NoChoices)
        ));
    }

    #[test]
    fn missing_choices_fails_to_decode() {
        assert!(serde_json::from_str::<CompletionResponse>(r#"{"error":"rate limited"}"#).is_err());
    }
}
