//! Groq provider (OpenAI-compatible chat completions).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{block_on, error_body, http_client, require_credential, LlmProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq API provider.
///
/// Any OpenAI-compatible server works here by pointing `base_url` at it.
pub struct GroqProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GroqProvider {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        Self {
            base_url,
            model,
            client: http_client(timeout),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn send(&self, instruction: &str, text: &str, key: &str) -> Result<String, ProviderError> {
        let body = build_request(&self.model, instruction, text);

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: error_body(resp).await,
            });
        }

        let out: ChatResponse = resp.json().await?;
        reply_text(out)
    }
}

impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn generate(
        &self,
        instruction: &str,
        text: &str,
        credential: &str,
    ) -> Result<String, ProviderError> {
        let key = require_credential(credential)?;
        log::debug!("Sending {} chars to {} ({})", text.len(), self.endpoint(), self.model);
        block_on(self.send(instruction, text, key))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

fn build_request<'a>(model: &'a str, instruction: &str, text: &str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: instruction.to_string(),
            },
            ChatMessage {
                role: "user",
                content: text.to_string(),
            },
        ],
        temperature: 0.0,
        response_format: ResponseFormat {
            kind: "json_object",
        },
    }
}

fn reply_text(resp: ChatResponse) -> Result<String, ProviderError> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)
}
