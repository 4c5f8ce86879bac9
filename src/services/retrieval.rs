use crate::config::Config;
use crate::error::Result;
use crate::models::{Candidate, SearchMode};
use crate::services::chroma::{ChromaClient, GetHit};
use crate::services::matcher::{best_title_index, normalize, MatcherConfig};
use crate::services::openai::OpenAiClient;
use log::info;
use tracing::debug;

/// Dispatches a query over the four search modes and converts index hits
/// into scored candidates. Zero hits is a valid outcome; backend failures
/// are not and propagate to the caller.
#[derive(Debug, Clone)]
pub struct RetrievalService {
    chroma: ChromaClient,
    openai: OpenAiClient,
    matcher: MatcherConfig,
}

impl RetrievalService {
    pub fn new(chroma: ChromaClient, openai: OpenAiClient, config: &Config) -> Self {
        Self {
            chroma,
            openai,
            matcher: config.matcher.clone(),
        }
    }

    pub async fn retrieve(
        &self,
        query: &str,
        mode: SearchMode,
        k: usize,
        show_all: bool,
        auto_title: bool,
    ) -> Result<Vec<Candidate>> {
        match mode {
            SearchMode::FreeContext | SearchMode::ThemeHint => {
                // A query that is clearly one known title skips semantic
                // search entirely: precision over recall.
                if auto_title {
                    if let Some(hit) = self.auto_title_match(query).await? {
                        info!(
                            "Auto-title short-circuit for '{}' -> '{}'",
                            query, hit.title
                        );
                        return Ok(vec![hit]);
                    }
                }

                let query_text = match mode {
                    SearchMode::ThemeHint => theme_hint_query(query),
                    _ => query.to_string(),
                };
                self.semantic(&query_text, k, show_all).await
            }
            SearchMode::TitleExact => self.title_exact(query).await,
            SearchMode::TitleContains => self.title_contains(query).await,
        }
    }

    async fn semantic(&self, query_text: &str, k: usize, show_all: bool) -> Result<Vec<Candidate>> {
        let k = if show_all {
            self.chroma.count().await?
        } else {
            k
        };
        if k == 0 {
            return Ok(Vec::new());
        }

        let embedding = self.openai.embed(query_text).await?;
        let hits = self.chroma.query(embedding, k).await?;

        debug!("Semantic search for '{}' returned {} hits", query_text, hits.len());

        Ok(hits
            .into_iter()
            .map(|h| Candidate::from_hit(&h.id, &h.metadata, &h.document, Some(h.distance)))
            .collect())
    }

    async fn title_exact(&self, query: &str) -> Result<Vec<Candidate>> {
        let wanted = normalize(query);

        // Cheap server-side filter first; the raw title only matches when
        // the user typed it verbatim.
        if let Ok(hits) = self
            .chroma
            .get(Some(serde_json::json!({ "title": query })), None)
            .await
        {
            let matched = filter_by_title(hits, |title| title == wanted);
            if !matched.is_empty() {
                return Ok(matched);
            }
        }

        let hits = self.full_scan().await?;
        Ok(filter_by_title(hits, |title| title == wanted))
    }

    async fn title_contains(&self, query: &str) -> Result<Vec<Candidate>> {
        let wanted = normalize(query);
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let hits = self.full_scan().await?;
        Ok(filter_by_title(hits, |title| title.contains(&wanted)))
    }

    /// Fuzzy-match the query against every indexed title; a confident hit
    /// becomes a single exact-score candidate.
    async fn auto_title_match(&self, query: &str) -> Result<Option<Candidate>> {
        let hits = self.full_scan().await?;
        if hits.is_empty() {
            return Ok(None);
        }

        let titles_norm: Vec<String> = hits.iter().map(|h| normalize(&h.metadata.title)).collect();

        Ok(
            best_title_index(&normalize(query), &titles_norm, &self.matcher).map(|idx| {
                let hit = &hits[idx];
                Candidate::from_hit(&hit.id, &hit.metadata, &hit.document, None)
            }),
        )
    }

    async fn full_scan(&self) -> Result<Vec<GetHit>> {
        let total = self.chroma.count().await?;
        if total == 0 {
            return Ok(Vec::new());
        }
        self.chroma.get(None, Some(total)).await
    }
}

/// Theme searches are rewritten into an explicit theme-recommendation
/// phrase so the embedding leans thematic rather than literal.
fn theme_hint_query(query: &str) -> String {
    format!("cărți cu tema {}; recomandări pe această temă", query)
}

fn filter_by_title<F>(hits: Vec<GetHit>, predicate: F) -> Vec<Candidate>
where
    F: Fn(&str) -> bool,
{
    hits.into_iter()
        .filter(|h| predicate(&normalize(&h.metadata.title)))
        .map(|h| Candidate::from_hit(&h.id, &h.metadata, &h.document, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookMeta;

    fn hit(title: &str) -> GetHit {
        GetHit {
            id: crate::models::slugify(title),
            document: format!("Titlu: {}\nRezumat: ceva", title),
            metadata: BookMeta {
                title: title.to_string(),
                author: String::new(),
                year: None,
                language: "ro".to_string(),
                themes: String::new(),
            },
        }
    }

    #[test]
    fn theme_hint_embeds_the_raw_query() {
        assert_eq!(
            theme_hint_query("aventură"),
            "cărți cu tema aventură; recomandări pe această temă"
        );
    }

    #[test]
    fn title_filters_are_diacritic_and_case_insensitive() {
        let hits = vec![hit("Stăpânul Inelelor: Frăția Inelului"), hit("Dune")];

        let wanted = normalize("stăpânul");
        let contains = filter_by_title(hits.clone(), |t| t.contains(&wanted));
        assert_eq!(contains.len(), 1);
        assert_eq!(contains[0].title, "Stăpânul Inelelor: Frăția Inelului");
        assert_eq!(contains[0].score, 1.0);

        let wanted = normalize("DUNE");
        let exact = filter_by_title(hits, |t| t == wanted);
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].title, "Dune");
    }
}
