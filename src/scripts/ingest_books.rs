use crate::error::Result;
use crate::models::{BookMeta, IndexedDocument};
use crate::scripts::seed_data::seed_books;
use crate::services::{BookStore, ChromaClient, OpenAiClient};
use indicatif::ProgressBar;
use log::{error, info};
use serde::Serialize;
use tokio::time::{sleep, Duration};

const BATCH_SIZE: usize = 8;
const MAX_RETRIES: u32 = 3;
const BASE_RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Serialize)]
pub struct IngestReport {
    pub seeded: usize,
    pub indexed: usize,
    pub failed_batches: usize,
    pub collection: String,
}

/// Retry an operation with exponential backoff.
async fn retry_with_backoff<F, Fut, T, E>(
    operation: F,
    max_retries: u32,
    base_delay_ms: u64,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;
                if attempt >= max_retries {
                    return Err(anyhow::anyhow!(
                        "Operation failed after {} attempts: {}",
                        max_retries,
                        e
                    )
                    .into());
                }
                let delay = base_delay_ms * 2u64.pow(attempt - 1);
                error!("Attempt {} failed, retrying in {}ms: {}", attempt, delay, e);
                sleep(Duration::from_millis(delay)).await;
            }
        }
    }
}

/// One-shot seed + index pass: refresh the relational store from the seed
/// dataset, embed every record, and upsert the vectors in small batches.
pub async fn ingest_books(
    store: &BookStore,
    chroma: &ChromaClient,
    openai: &OpenAiClient,
) -> Result<IngestReport> {
    info!("Starting book ingestion...");

    let seeded = store.upsert_books(&seed_books()).await?;

    let books = store.all_books().await?;
    if books.is_empty() {
        return Err(crate::error::ApiError::NotFound(
            "No rows found in book_summaries".to_string(),
        ));
    }

    let documents: Vec<IndexedDocument> = books.iter().map(IndexedDocument::from_record).collect();
    let total_batches = documents.len().div_ceil(BATCH_SIZE);
    info!(
        "Indexing {} documents in {} batches of up to {}",
        documents.len(),
        total_batches,
        BATCH_SIZE
    );

    let progress = ProgressBar::new(documents.len() as u64);
    let mut indexed = 0usize;
    let mut failed_batches = 0usize;

    for batch in documents.chunks(BATCH_SIZE) {
        let mut ids: Vec<String> = Vec::with_capacity(batch.len());
        let mut embeddings: Vec<Vec<f32>> = Vec::with_capacity(batch.len());
        let mut docs: Vec<String> = Vec::with_capacity(batch.len());
        let mut metadatas: Vec<BookMeta> = Vec::with_capacity(batch.len());

        let mut batch_ok = true;
        for document in batch {
            match openai.embed(&document.document).await {
                Ok(embedding) => {
                    ids.push(document.id.clone());
                    embeddings.push(embedding);
                    docs.push(document.document.clone());
                    metadatas.push(document.metadata.clone());
                }
                Err(e) => {
                    error!("Failed to embed '{}': {}", document.id, e);
                    batch_ok = false;
                    break;
                }
            }
        }

        if !batch_ok {
            failed_batches += 1;
            progress.inc(batch.len() as u64);
            continue;
        }

        let outcome = retry_with_backoff(
            || chroma.upsert(&ids, &embeddings, &docs, &metadatas),
            MAX_RETRIES,
            BASE_RETRY_DELAY_MS,
        )
        .await;

        match outcome {
            Ok(()) => indexed += batch.len(),
            Err(e) => {
                error!("Failed to index batch after retries: {}", e);
                failed_batches += 1;
            }
        }

        progress.inc(batch.len() as u64);
    }

    progress.finish_and_clear();

    info!(
        "Ingestion complete: {} seeded, {} indexed, {} failed batches",
        seeded, indexed, failed_batches
    );

    Ok(IngestReport {
        seeded,
        indexed,
        failed_batches,
        collection: chroma.collection_name().to_string(),
    })
}
