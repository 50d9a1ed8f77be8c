//! Google Gemini provider.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{block_on, error_body, http_client, require_credential, LlmProvider, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini `generateContent` provider. The instruction and document are sent
/// as a single prompt with JSON output requested.
pub struct GeminiProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        Self {
            base_url,
            model,
            client: http_client(timeout),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn send(&self, instruction: &str, text: &str, key: &str) -> Result<String, ProviderError> {
        let body = build_request(instruction, text);

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(without_key)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: error_body(resp).await,
            });
        }

        let out: GenerateResponse = resp.json().await.map_err(without_key)?;
        reply_text(out)
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn generate(
        &self,
        instruction: &str,
        text: &str,
        credential: &str,
    ) -> Result<String, ProviderError> {
        let key = require_credential(credential)?;
        log::debug!("Sending {} chars to {} ({})", text.len(), self.base_url, self.model);
        block_on(self.send(instruction, text, key))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// The key travels in the query string; keep it out of error messages.
fn without_key(err: reqwest::Error) -> ProviderError {
    ProviderError::Http(err.without_url())
}

fn build_request(instruction: &str, text: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(format!("{instruction}\n\nText:\n{text}")),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            temperature: 0.0,
        },
    }
}

fn reply_text(resp: GenerateResponse) -> Result<String, ProviderError> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = build_request("Extract these fields", "Card ending in 1234");
        let json = serde_json::to_value(&req).unwrap();
        let prompt = json["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.starts_with("Extract these fields"));
        assert!(prompt.ends_with("Card ending in 1234"));
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_reply_parts_concatenated() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"due_date\":"},{"text":"\"04/11/2021\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(reply_text(resp).unwrap(), r#"{"due_date":"04/11/2021"}"#);
    }

    #[test]
    fn test_blocked_reply_is_empty() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(matches!(reply_text(resp), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn test_endpoint() {
        let provider = GeminiProvider::new(
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(1),
        );
        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
