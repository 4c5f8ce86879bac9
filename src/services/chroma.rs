use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::BookMeta;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Typed HTTP client for a Chroma collection. The collection is resolved
/// (get-or-create) at construction so an unreachable backend fails fast as
/// a configuration problem instead of surfacing later as "no results".
#[derive(Debug, Clone)]
pub struct ChromaClient {
    client: Client,
    base_url: String,
    collection_id: String,
    collection_name: String,
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    ids: &'a [String],
    embeddings: &'a [Vec<f32>],
    documents: &'a [String],
    metadatas: &'a [BookMeta],
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    include: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct RawQueryResponse {
    ids: Vec<Vec<String>>,
    #[serde(default)]
    documents: Vec<Vec<Option<String>>>,
    #[serde(default)]
    metadatas: Vec<Vec<Option<BookMeta>>>,
    #[serde(default)]
    distances: Vec<Vec<f64>>,
}

#[derive(Debug, Serialize)]
struct GetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    r#where: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    include: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct RawGetResponse {
    ids: Vec<String>,
    #[serde(default)]
    documents: Vec<Option<String>>,
    #[serde(default)]
    metadatas: Vec<Option<BookMeta>>,
}

/// One nearest-neighbour hit, distances included.
#[derive(Debug, Clone)]
pub struct QueryHit {
    pub id: String,
    pub document: String,
    pub metadata: BookMeta,
    pub distance: f64,
}

/// One metadata-scan hit; no distance is involved.
#[derive(Debug, Clone)]
pub struct GetHit {
    pub id: String,
    pub document: String,
    pub metadata: BookMeta,
}

impl ChromaClient {
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.chroma_url.trim_end_matches('/').to_string();

        let response = client
            .post(format!("{}/api/v1/collections", base_url))
            .json(&CreateCollectionRequest {
                name: &config.chroma_collection,
                get_or_create: true,
            })
            .send()
            .await
            .map_err(|e| {
                ApiError::Configuration(format!(
                    "Vector store unreachable at {}: {}",
                    base_url, e
                ))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::VectorStoreError(format!(
                "Failed to open collection '{}': {}",
                config.chroma_collection, error_text
            )));
        }

        let collection: CollectionResponse = response.json().await.map_err(|e| {
            ApiError::VectorStoreError(format!("Malformed collection response: {}", e))
        })?;

        info!(
            "Connected to Chroma collection '{}' ({})",
            config.chroma_collection, collection.id
        );

        Ok(Self {
            client,
            base_url,
            collection_id: collection.id,
            collection_name: config.chroma_collection.clone(),
        })
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/v1/collections/{}/{}",
            self.base_url, self.collection_id, suffix
        )
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub async fn upsert(
        &self,
        ids: &[String],
        embeddings: &[Vec<f32>],
        documents: &[String],
        metadatas: &[BookMeta],
    ) -> Result<()> {
        let response = self
            .client
            .post(self.collection_url("upsert"))
            .json(&UpsertRequest {
                ids,
                embeddings,
                documents,
                metadatas,
            })
            .send()
            .await
            .map_err(|e| ApiError::VectorStoreError(format!("Upsert request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::VectorStoreError(format!(
                "Upsert failed: {}",
                error_text
            )));
        }

        Ok(())
    }

    /// Nearest neighbours of `embedding`, closest first.
    pub async fn query(&self, embedding: Vec<f32>, top_k: usize) -> Result<Vec<QueryHit>> {
        let response = self
            .client
            .post(self.collection_url("query"))
            .json(&QueryRequest {
                query_embeddings: vec![embedding],
                n_results: top_k,
                include: vec!["documents", "metadatas", "distances"],
            })
            .send()
            .await
            .map_err(|e| ApiError::VectorStoreError(format!("Query request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::VectorStoreError(format!(
                "Query failed: {}",
                error_text
            )));
        }

        let raw: RawQueryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::VectorStoreError(format!("Malformed query response: {}", e)))?;

        let ids = raw.ids.into_iter().next().unwrap_or_default();
        let documents = raw.documents.into_iter().next().unwrap_or_default();
        let metadatas = raw.metadatas.into_iter().next().unwrap_or_default();
        let distances = raw.distances.into_iter().next().unwrap_or_default();

        let mut hits = Vec::with_capacity(ids.len());
        for (((id, document), metadata), distance) in ids
            .into_iter()
            .zip(documents)
            .zip(metadatas)
            .zip(distances)
        {
            if let Some(metadata) = metadata {
                hits.push(QueryHit {
                    id,
                    document: document.unwrap_or_default(),
                    metadata,
                    distance,
                });
            }
        }

        debug!("Chroma query returned {} hits", hits.len());
        Ok(hits)
    }

    /// Metadata scan, optionally filtered server-side and/or capped.
    pub async fn get(
        &self,
        filter: Option<serde_json::Value>,
        limit: Option<usize>,
    ) -> Result<Vec<GetHit>> {
        let response = self
            .client
            .post(self.collection_url("get"))
            .json(&GetRequest {
                r#where: filter,
                limit,
                include: vec!["documents", "metadatas"],
            })
            .send()
            .await
            .map_err(|e| ApiError::VectorStoreError(format!("Get request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::VectorStoreError(format!(
                "Get failed: {}",
                error_text
            )));
        }

        let raw: RawGetResponse = response
            .json()
            .await
            .map_err(|e| ApiError::VectorStoreError(format!("Malformed get response: {}", e)))?;

        let mut hits = Vec::with_capacity(raw.ids.len());
        for ((id, document), metadata) in raw
            .ids
            .into_iter()
            .zip(raw.documents)
            .zip(raw.metadatas)
        {
            if let Some(metadata) = metadata {
                hits.push(GetHit {
                    id,
                    document: document.unwrap_or_default(),
                    metadata,
                });
            }
        }

        Ok(hits)
    }

    pub async fn count(&self) -> Result<usize> {
        let response = self
            .client
            .get(self.collection_url("count"))
            .send()
            .await
            .map_err(|e| ApiError::VectorStoreError(format!("Count request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::VectorStoreError(format!(
                "Count failed: {}",
                error_text
            )));
        }

        let count = response
            .json::<usize>()
            .await
            .map_err(|e| ApiError::VectorStoreError(format!("Malformed count response: {}", e)))?;

        Ok(count)
    }
}
