use crate::config::Config;
use crate::error::{ApiError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the embedding/chat/speech/image endpoints of the OpenAI API.
/// Credentials come from the injected [`Config`]; a missing key is a
/// configuration error at construction, never a silent empty result later.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    chat_model: String,
    chat_temperature: f32,
    embedding_model: String,
    tts_model: String,
    image_model: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self> {
        if config.openai_api_key.trim().is_empty() {
            return Err(ApiError::Configuration(
                "OPENAI_API_KEY is missing or empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            api_key: config.openai_api_key.clone(),
            chat_model: config.chat_model.clone(),
            chat_temperature: config.chat_temperature,
            embedding_model: config.embedding_model.clone(),
            tts_model: config.tts_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match status.as_u16() {
            401 | 403 => "Authentication failed. Check your OpenAI API key.".to_string(),
            429 => "Rate limit exceeded. Reduce request frequency or upgrade your plan.".to_string(),
            _ => format!("OpenAI API returned {}: {}", status, text),
        };
        Err(ApiError::ExternalServiceError(message))
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.embedding_model,
                input: text,
            })
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            ApiError::ExternalServiceError(format!("Malformed embedding response: {}", e))
        })?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .unwrap_or_default();

        if embedding.is_empty() {
            return Err(ApiError::ExternalServiceError(
                "Embedding response contained no vector".to_string(),
            ));
        }

        debug!("Got embedding of size {}", embedding.len());
        Ok(embedding)
    }

    pub async fn chat_complete(&self, system: &str, user: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.chat_model,
                temperature: self.chat_temperature,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: system,
                    },
                    ChatMessage {
                        role: "user",
                        content: user,
                    },
                ],
            })
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ApiError::ExternalServiceError(format!("Malformed chat response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                ApiError::ExternalServiceError("Chat response contained no choices".to_string())
            })
    }

    /// MP3 speech for `text`. Errors propagate; the provider chain above
    /// this call decides whether they are fatal.
    pub async fn speech(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(format!("{}/v1/audio/speech", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&SpeechRequest {
                model: &self.tts_model,
                voice,
                input: text,
            })
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await.map_err(|e| {
            ApiError::ExternalServiceError(format!("Failed to read audio payload: {}", e))
        })?;

        Ok(bytes.to_vec())
    }

    /// PNG bytes for a generated illustration.
    pub async fn generate_image(&self, prompt: &str, size: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(format!("{}/v1/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ImageRequest {
                model: &self.image_model,
                prompt,
                size,
                quality: "high",
            })
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed: ImageResponse = response.json().await.map_err(|e| {
            ApiError::ExternalServiceError(format!("Malformed image response: {}", e))
        })?;

        let encoded = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.b64_json)
            .ok_or_else(|| {
                ApiError::ExternalServiceError("Image response contained no data".to_string())
            })?;

        BASE64.decode(encoded.as_bytes()).map_err(|e| {
            ApiError::ExternalServiceError(format!("Image payload is not valid base64: {}", e))
        })
    }
}
