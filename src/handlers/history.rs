use crate::error::ApiError;
use crate::services::BookStore;
use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Most recent searches, newest first.
#[get("/history")]
pub async fn history(
    query: web::Query<HistoryQuery>,
    store: web::Data<BookStore>,
) -> Result<HttpResponse, ApiError> {
    let rows = store.recent_searches(query.limit.clamp(1, 100)).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "history": rows })))
}
