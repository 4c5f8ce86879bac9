use crate::services::openai::OpenAiClient;
use async_trait::async_trait;
use log::warn;
use serde::Deserialize;

pub const MIME_PNG: &str = "image/png";
const SUMMARY_CONTEXT_CHARS: usize = 450;
const DEFAULT_STYLE: &str = "copertă minimală";
const DEFAULT_SIZE: &str = "1024x1024";

/// Fields describing the book an illustration should evoke.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub themes: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

fn style_hint(style: &str) -> &'static str {
    match style {
        "scenă cinematică" => {
            "cinematic wide scene, dramatic lighting, volumetric fog, detailed environment"
        }
        "ilustrație acquarela" => {
            "watercolor illustration, soft edges, paper texture, gentle palette"
        }
        "poster vintage" => "vintage poster, retro print textures, bold typography, grainy look",
        _ => "minimalist book cover, modern graphic shapes, clean typography, high contrast, subtle texture",
    }
}

/// Steers the model toward original, suggestive art; no logos, no
/// copyrighted covers.
pub fn build_image_prompt(spec: &ImageSpec) -> String {
    let style = spec.style.as_deref().unwrap_or(DEFAULT_STYLE);
    let context: String = spec.summary.chars().take(SUMMARY_CONTEXT_CHARS).collect();

    format!(
        "Create an original, copyright-safe illustration inspired by the book below.\n\
         Focus on atmosphere and themes, avoid text or logos, no copyrighted covers.\n\
         Book: \"{}\" by {}. Themes: {}.\n\
         Short context: {}\n\
         Art direction: {}. Highly detailed, professional quality, coherent composition.",
        spec.title,
        spec.author,
        spec.themes,
        context,
        style_hint(style)
    )
}

/// A single image backend; empty payload means "nothing produced".
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn generate(&self, prompt: &str, size: &str) -> crate::error::Result<Vec<u8>>;
}

pub struct OpenAiImage {
    client: OpenAiClient,
}

impl OpenAiImage {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImage {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, prompt: &str, size: &str) -> crate::error::Result<Vec<u8>> {
        self.client.generate_image(prompt, size).await
    }
}

/// Ordered provider chain for illustrations, same contract as speech:
/// first non-empty result wins and total failure is the empty sentinel.
pub struct ImageService {
    providers: Vec<Box<dyn ImageProvider>>,
}

impl ImageService {
    pub fn new(providers: Vec<Box<dyn ImageProvider>>) -> Self {
        Self { providers }
    }

    /// Returns (image_bytes, mime, prompt_used); empty bytes when every
    /// provider came up short.
    pub async fn generate(&self, spec: &ImageSpec) -> (Vec<u8>, String, String) {
        let prompt = build_image_prompt(spec);
        let size = spec.size.as_deref().unwrap_or(DEFAULT_SIZE);

        for provider in &self.providers {
            match provider.generate(&prompt, size).await {
                Ok(bytes) if !bytes.is_empty() => {
                    return (bytes, MIME_PNG.to_string(), prompt);
                }
                Ok(_) => warn!("Image provider '{}' produced no image", provider.name()),
                Err(e) => warn!("Image provider '{}' failed: {}", provider.name(), e),
            }
        }

        (Vec::new(), MIME_PNG.to_string(), prompt)
    }
}
