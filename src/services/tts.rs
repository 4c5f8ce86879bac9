use crate::services::openai::OpenAiClient;
use async_trait::async_trait;
use log::warn;

pub const MIME_MP3: &str = "audio/mp3";

/// A single speech backend. Implementations return the raw audio payload
/// and its mime type; an empty payload means "nothing produced".
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn synthesize(&self, text: &str, voice: &str) -> crate::error::Result<(Vec<u8>, String)>;
}

pub struct OpenAiSpeech {
    client: OpenAiClient,
}

impl OpenAiSpeech {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpeechProvider for OpenAiSpeech {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn synthesize(&self, text: &str, voice: &str) -> crate::error::Result<(Vec<u8>, String)> {
        let audio = self.client.speech(text, voice).await?;
        Ok((audio, MIME_MP3.to_string()))
    }
}

/// Walks an ordered provider chain and keeps the first non-empty payload.
/// Total failure is the empty-bytes sentinel, never an error: speech is a
/// best-effort capability and the caller degrades gracefully.
pub struct SpeechService {
    providers: Vec<Box<dyn SpeechProvider>>,
    default_voice: String,
}

impl SpeechService {
    pub fn new(providers: Vec<Box<dyn SpeechProvider>>, default_voice: String) -> Self {
        Self {
            providers,
            default_voice,
        }
    }

    pub async fn synthesize(&self, text: &str, voice: Option<&str>) -> (Vec<u8>, String) {
        if text.trim().is_empty() {
            return (Vec::new(), MIME_MP3.to_string());
        }

        let voice = voice.unwrap_or(&self.default_voice);
        for provider in &self.providers {
            match provider.synthesize(text, voice).await {
                Ok((audio, mime)) if !audio.is_empty() => return (audio, mime),
                Ok(_) => warn!("Speech provider '{}' produced no audio", provider.name()),
                Err(e) => warn!("Speech provider '{}' failed: {}", provider.name(), e),
            }
        }

        (Vec::new(), MIME_MP3.to_string())
    }
}
