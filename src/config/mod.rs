use crate::error::{ApiError, Result};
use crate::services::matcher::MatcherConfig;
use std::env;

const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
const DEFAULT_TTS_MODEL: &str = "gpt-4o-mini-tts";
const DEFAULT_TTS_VOICE: &str = "alloy";
const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";
const DEFAULT_CHAT_TEMPERATURE: f32 = 0.35;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 15;

/// Runtime configuration, built once from the environment and injected into
/// every collaborator at construction time. Nothing downstream of this
/// struct reads process environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub chroma_url: String,
    pub chroma_collection: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub chat_model: String,
    pub chat_temperature: f32,
    pub embedding_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub matcher: MatcherConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ApiError::Configuration("OPENAI_API_KEY must be set".to_string()))?;

        if openai_api_key.trim().is_empty() {
            return Err(ApiError::Configuration(
                "OPENAI_API_KEY is empty".to_string(),
            ));
        }

        let defaults = MatcherConfig::default();
        let matcher = MatcherConfig {
            accept_threshold: env_or("APP_MATCHER_ACCEPT_THRESHOLD", defaults.accept_threshold),
            substring_bonus: env_or("APP_MATCHER_SUBSTRING_BONUS", defaults.substring_bonus),
            prefix_bonus: env_or("APP_MATCHER_PREFIX_BONUS", defaults.prefix_bonus),
            gap_penalty_step: env_or("APP_MATCHER_GAP_PENALTY_STEP", defaults.gap_penalty_step),
            gap_penalty_cap: env_or("APP_MATCHER_GAP_PENALTY_CAP", defaults.gap_penalty_cap),
        };

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://book_summaries.db".to_string()),
            chroma_url: env::var("CHROMA_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            chroma_collection: env::var("CHROMA_COLLECTION").unwrap_or_else(|_| "books".to_string()),
            openai_api_key,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            chat_model: env::var("APP_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            chat_temperature: env_or("APP_CHAT_TEMPERATURE", DEFAULT_CHAT_TEMPERATURE),
            embedding_model: env::var("APP_EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string()),
            tts_model: env::var("APP_TTS_MODEL").unwrap_or_else(|_| DEFAULT_TTS_MODEL.to_string()),
            tts_voice: env::var("APP_TTS_VOICE").unwrap_or_else(|_| DEFAULT_TTS_VOICE.to_string()),
            image_model: env::var("APP_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            request_timeout_secs: env_or("APP_EXTERNAL_SERVICE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECONDS),
            connect_timeout_secs: env_or(
                "APP_EXTERNAL_SERVICE_CONNECT_TIMEOUT_SECS",
                DEFAULT_CONNECT_TIMEOUT_SECONDS,
            ),
            matcher,
        })
    }
}
