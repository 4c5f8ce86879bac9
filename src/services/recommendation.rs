use crate::error::{ApiError, Result};
use crate::models::{Candidate, SearchMode, SearchRequest};
use crate::services::book_store::BookStore;
use crate::services::composer::AnswerComposer;
use crate::services::language_filter::is_inappropriate;
use crate::services::retrieval::RetrievalService;
use log::{info, warn};

const BLOCKED_MESSAGE: &str =
    "Hai să păstrăm conversația prietenoasă 😊. Te rog reformulează fără limbaj ofensator.";

/// Result of one pipeline run. Blocked queries and empty candidate lists
/// are both valid outcomes, distinct from each other and from errors.
#[derive(Debug)]
pub enum SearchOutcome {
    Blocked { message: String },
    Completed { answer: String, items: Vec<Candidate> },
}

/// The full per-query pipeline: content filter, retrieval dispatch, answer
/// composition, recommendation-aware reordering, history logging.
#[derive(Clone)]
pub struct RecommendationService {
    retrieval: RetrievalService,
    composer: AnswerComposer,
    store: BookStore,
}

impl RecommendationService {
    pub fn new(retrieval: RetrievalService, composer: AnswerComposer, store: BookStore) -> Self {
        Self {
            retrieval,
            composer,
            store,
        }
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let query = request.query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
        }

        // The filter runs before any retrieval or LLM call.
        let (blocked, term) = is_inappropriate(query);
        if blocked {
            info!("Blocked query (matched term '{}')", term);
            return Ok(SearchOutcome::Blocked {
                message: BLOCKED_MESSAGE.to_string(),
            });
        }

        let mut items = self
            .retrieval
            .retrieve(
                query,
                request.mode,
                request.k,
                request.show_all,
                request.auto_title,
            )
            .await?;

        // Exact title lookups keep only the first hit.
        if request.mode == SearchMode::TitleExact {
            items.truncate(1);
        }

        info!(
            "Retrieved {} candidates for '{}' ({})",
            items.len(),
            query,
            request.mode.as_str()
        );

        let (answer, items) = self.composer.compose(query, items).await?;

        if let Err(e) = self
            .store
            .record_search(query, request.mode.as_str(), items.len())
            .await
        {
            warn!("Failed to record search history: {}", e);
        }

        Ok(SearchOutcome::Completed { answer, items })
    }
}
