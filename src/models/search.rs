use crate::models::Candidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four retrieval modes the pipeline dispatches over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    FreeContext,
    ThemeHint,
    TitleExact,
    TitleContains,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::FreeContext => "free_context",
            SearchMode::ThemeHint => "theme_hint",
            SearchMode::TitleExact => "title_exact",
            SearchMode::TitleContains => "title_contains",
        }
    }
}

fn default_k() -> usize {
    5
}

fn default_auto_title() -> bool {
    true
}

/// Everything the pipeline needs for one query; presentation state stays
/// outside the core.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub show_all: bool,
    #[serde(default = "default_auto_title")]
    pub auto_title: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub items: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SearchHistory {
    pub id: Uuid,
    pub query: String,
    pub mode: String,
    pub results: i64,
    pub created_at: DateTime<Utc>,
}
