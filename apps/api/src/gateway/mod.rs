//! Generation Gateway — the single point of entry for all calls to the
//! text/image generation collaborator.
//!
//! ARCHITECTURAL RULE: no other module may reach the generation service
//! directly. All generation traffic MUST go through this module.
//!
//! The gateway performs exactly one request per call — no retry, no backoff.
//! Retrying is a caller decision made by re-invoking the operation.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("generation service unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("generation service returned status {0}")]
    BadStatus(u16),

    #[error("generation service returned no usable content")]
    EmptyBody,
}

#[derive(Debug, Serialize)]
struct GenerationMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    messages: Vec<GenerationMessage<'a>>,
    provider: &'a str,
}

/// The collaborator answers with either `content` or `response` holding the
/// generated text, depending on the provider behind it.
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    content: Option<String>,
    response: Option<String>,
}

impl GenerationResponse {
    fn into_text(self) -> Option<String> {
        self.content
            .or(self.response)
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    provider: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
}

/// HTTP client for the generation collaborator. Cheap to clone.
#[derive(Clone)]
pub struct GenerationGateway {
    client: Client,
    base_url: String,
    provider: String,
}

impl GenerationGateway {
    pub fn new(base_url: String, provider: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            provider,
        }
    }

    /// Sends a composed prompt and returns the raw generated text.
    ///
    /// The system fragment rides as the first message so providers that
    /// honor a system role can use it; others fold it into the context.
    pub async fn send(&self, prompt: &str, system: &str) -> Result<String, GatewayError> {
        let request_body = GenerationRequest {
            messages: vec![
                GenerationMessage {
                    role: "system",
                    content: system,
                },
                GenerationMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            provider: &self.provider,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::BadStatus(status.as_u16()));
        }

        // A success response whose body does not decode to the expected
        // shape has no usable content field, same as a missing one.
        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|_| GatewayError::EmptyBody)?;

        let text = body.into_text().ok_or(GatewayError::EmptyBody)?;
        debug!("gateway call succeeded ({} bytes)", text.len());
        Ok(text)
    }

    /// Single-field image generation. Same contract as `send`.
    pub async fn send_image(&self, prompt: &str) -> Result<String, GatewayError> {
        let request_body = ImageRequest {
            prompt,
            provider: &self.provider,
        };

        let response = self
            .client
            .post(format!("{}/image", self.base_url.trim_end_matches('/')))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::BadStatus(status.as_u16()));
        }

        let body: ImageResponse = response
            .json()
            .await
            .map_err(|_| GatewayError::EmptyBody)?;

        body.image_url
            .filter(|u| !u.trim().is_empty())
            .ok_or(GatewayError::EmptyBody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_prefers_content_field() {
        let body: GenerationResponse = serde_json::from_str(
            r#"{"content": "from content", "response": "from response"}"#,
        )
        .unwrap();
        assert_eq!(body.into_text().as_deref(), Some("from content"));
    }

    #[test]
    fn test_response_falls_back_to_response_field() {
        let body: GenerationResponse =
            serde_json::from_str(r#"{"response": "fallback text"}"#).unwrap();
        assert_eq!(body.into_text().as_deref(), Some("fallback text"));
    }

    #[test]
    fn test_blank_content_counts_as_empty() {
        let body: GenerationResponse =
            serde_json::from_str(r#"{"content": "   \n"}"#).unwrap();
        assert!(body.into_text().is_none());
    }

    #[test]
    fn test_missing_both_fields_counts_as_empty() {
        let body: GenerationResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.into_text().is_none());
    }

    #[test]
    fn test_image_response_field_name() {
        let body: ImageResponse =
            serde_json::from_str(r#"{"imageUrl": "https://cdn.example/c.png"}"#).unwrap();
        assert_eq!(body.image_url.as_deref(), Some("https://cdn.example/c.png"));
    }
}
