use crate::services::{ImageService, ImageSpec, SpeechService};
use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
}

fn unavailable(warning: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "available": false,
        "warning": warning,
    }))
}

/// Synthesize speech for a piece of text. An empty payload from the
/// provider chain degrades to a JSON warning instead of an error.
#[post("/speech")]
pub async fn speech(
    request: web::Json<SpeechRequest>,
    service: web::Data<SpeechService>,
) -> HttpResponse {
    let (audio, mime) = service
        .synthesize(&request.text, request.voice.as_deref())
        .await;

    if audio.is_empty() {
        return unavailable("Nu am putut genera audio.");
    }

    HttpResponse::Ok().content_type(mime).body(audio)
}

/// Generate an illustration for a book. Same degrade-to-warning contract
/// as speech.
#[post("/image")]
pub async fn image(
    request: web::Json<ImageSpec>,
    service: web::Data<ImageService>,
) -> HttpResponse {
    let (bytes, mime, _prompt) = service.generate(&request).await;

    if bytes.is_empty() {
        return unavailable("Nu am putut genera imaginea. Încearcă alt stil.");
    }

    HttpResponse::Ok().content_type(mime).body(bytes)
}
