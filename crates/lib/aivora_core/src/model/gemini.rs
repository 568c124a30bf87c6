//! Gemini provider.
//!
//! Calls the Generative Language API (`models/{model}:generateContent`) once
//! per prompt. No streaming and no retry: a failed call is reported to the
//! caller as-is.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use super::config::ModelConfig;
use super::{ChatModel, ModelError, ModelFactory};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    candidate_count: u32,
}

/// Builds [`GeminiModel`]s sharing one HTTP client.
#[derive(Clone)]
pub struct GeminiFactory {
    client: Client,
    config: ModelConfig,
}

impl GeminiFactory {
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ModelError::Request(format!("http client: {e}")))?;
        Ok(Self { client, config })
    }
}

impl ModelFactory for GeminiFactory {
    fn create_fast_model(&self, temperature: f32) -> Box<dyn ChatModel> {
        Box::new(GeminiModel {
            client: self.client.clone(),
            api_key: self.config.api_key().map(str::to_string),
            base_url: self.config.base_url.trim_end_matches('/').to_string(),
            model: self.config.fast_model.clone(),
            temperature,
        })
    }
}

/// A single Gemini model at a fixed temperature.
pub struct GeminiModel {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
}

#[async_trait]
impl ChatModel for GeminiModel {
    async fn invoke(&self, prompt: &str) -> Result<Value, ModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ModelError::NotConfigured("GEMINI_API_KEY is not set".to_string()))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, prompt_len = prompt.len(), "calling Gemini");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest {
                contents: vec![GeminiContent {
                    role: "user",
                    parts: vec![GeminiPart { text: prompt }],
                }],
                generation_config: GenerationConfig {
                    temperature: self.temperature,
                    candidate_count: 1,
                },
            })
            .send()
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(ModelError::Api { status, body });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        Ok(match candidate_text(&body) {
            Some(text) => json!({ "content": text }),
            None => body,
        })
    }
}

/// Concatenated text parts of the first candidate, if there are any.
fn candidate_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}
