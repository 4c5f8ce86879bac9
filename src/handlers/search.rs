use crate::error::ApiError;
use crate::models::{SearchRequest, SearchResponse};
use crate::services::{RecommendationService, SearchOutcome};
use actix_web::{post, web, HttpResponse};

/// Run the full recommendation pipeline for one query.
#[post("/search")]
pub async fn search(
    request: web::Json<SearchRequest>,
    service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
    }

    let response = match service.search(&request).await? {
        SearchOutcome::Blocked { message } => SearchResponse {
            blocked: true,
            message: Some(message),
            answer: None,
            items: Vec::new(),
        },
        SearchOutcome::Completed { answer, items } => {
            let message = if items.is_empty() {
                Some(
                    "Nu am găsit potriviri. Verifică ortografia sau încearcă alt mod de căutare."
                        .to_string(),
                )
            } else {
                None
            };
            SearchResponse {
                blocked: false,
                message,
                answer: Some(answer),
                items,
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}
