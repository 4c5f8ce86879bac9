use crate::error::ApiError;
use crate::scripts;
use crate::services::{BookStore, ChromaClient, OpenAiClient};
use actix_web::{post, web, HttpResponse};

/// Seed the relational store and (re)index every record into the vector
/// collection. Idempotent: records upsert by title, vectors by id.
#[post("/ingest")]
pub async fn ingest(
    store: web::Data<BookStore>,
    chroma: web::Data<ChromaClient>,
    openai: web::Data<OpenAiClient>,
) -> Result<HttpResponse, ApiError> {
    let report = scripts::ingest_books(&store, &chroma, &openai).await?;
    Ok(HttpResponse::Ok().json(report))
}
