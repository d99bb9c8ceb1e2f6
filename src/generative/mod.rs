//! Generative-text client
//!
//! The city-search endpoint sends one prompt and receives one block of
//! free text. [`TextGenerator`] is the seam that lets the endpoint run
//! against a fake in tests; [`OpenAiClient`] talks to any
//! OpenAI-compatible chat-completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::config::GenerativeConfig;
use crate::{Result, TravelError};

const SYSTEM_PROMPT: &str =
    "당신은 어린이를 위한 친절한 여행 선생님입니다. 쉽고 정확한 한국어로 답하세요.";

/// Source of generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate an answer for `prompt`. Attempted once, never retried.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Prompt asking for the five-part city description the parser expects
#[must_use]
pub fn build_city_prompt(city: &str) -> String {
    format!(
        "{city}에 대해 어린이가 이해하기 쉽게 알려주세요. 아래 형식을 지켜 주세요.\n\
         국가: (나라 이름)\n\
         (도시를 소개하는 2~3문장)\n\
         주요 특징\n\
         1. \n2. \n3. \n\
         문화 정보\n\
         언어: \n\
         화폐: \n\
         최적 방문 시기: \n\
         유명한 것: (쉼표로 구분해 3가지)\n\
         여행 팁\n\
         1. \n2. \n3. \n\
         학습 포인트\n\
         1. \n2. \n3. "
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(config: &GenerativeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TravelMaker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TravelError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    #[instrument(name = "generate_text", skip_all)]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            TravelError::config("Generative API key is not configured")
        })?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Generative API request to {} with model {}", url, self.model);
        let start_time = Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Generative API request failed: {}", e);
                TravelError::api(format!("Generative API request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generative API returned {}: {}", status, body);
            return match status.as_u16() {
                401 | 403 => Err(TravelError::config(
                    "Generative API rejected the configured API key",
                )),
                429 => Err(TravelError::api("Generative API rate limit exceeded")),
                _ => Err(TravelError::api(format!(
                    "Generative API error {status}: {body}"
                ))),
            };
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            TravelError::parse(format!("Failed to parse generative API response: {e}"))
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| TravelError::parse("Generative API returned no content"))?;

        info!(
            "Generated {} characters in {:.3}s",
            text.chars().count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_city_and_sections() {
        let prompt = build_city_prompt("도쿄");
        assert!(prompt.starts_with("도쿄에 대해"));
        for heading in ["국가:", "주요 특징", "언어:", "화폐:", "최적 방문 시기:", "유명한 것:", "여행 팁", "학습 포인트"] {
            assert!(prompt.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = GenerativeConfig {
            base_url: "http://localhost:9999/v1/".to_string(),
            ..GenerativeConfig::default()
        };
        let client = OpenAiClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let client = OpenAiClient::new(&GenerativeConfig::default()).unwrap();
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, TravelError::Config { .. }));
    }
}
