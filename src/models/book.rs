use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

fn default_language() -> String {
    "ro".to_string()
}

/// A canonical book record as stored in the `book_summaries` table.
/// Immutable once stored; `title` is globally unique within the store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookRecord {
    pub title: String,
    pub author: Option<String>,
    pub year: Option<i64>,
    #[serde(default = "default_language")]
    pub language: String,
    pub summary: String,
    pub themes: Option<String>,
}

/// Structured metadata stored alongside each indexed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMeta {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub year: Option<i64>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub themes: String,
}

/// What actually goes into the vector collection for one book: a stable id,
/// the embeddable text blob, and the metadata map.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub id: String,
    pub document: String,
    pub metadata: BookMeta,
}

impl IndexedDocument {
    pub fn from_record(record: &BookRecord) -> Self {
        let author = record.author.clone().unwrap_or_default();
        let themes_raw = record.themes.clone().unwrap_or_default();
        let year = record
            .year
            .map(|y| y.to_string())
            .unwrap_or_default();

        // Embed summary + themes together to help recall.
        let document = format!(
            "Titlu: {}\nAutor: {}\nAn: {}\nLimbă: {}\nTeme: {}\nRezumat: {}",
            record.title, author, year, record.language, themes_raw, record.summary
        );

        let themes = themes_raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            id: slugify(&format!("{}-{}", record.title, author)),
            document,
            metadata: BookMeta {
                title: record.title.clone(),
                author,
                year: record.year,
                language: record.language.clone(),
                themes,
            },
        }
    }
}

/// A transient per-query result. `score` lives in [0, 1]; 1.0 means an
/// exact structural match, lower values track semantic distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub author: String,
    pub year: Option<i64>,
    pub themes: String,
    pub summary: String,
    pub score: f64,
}

impl Candidate {
    /// Build a candidate from one indexed hit. `distance` is absent for
    /// exact title lookups, in which case the score is pinned to 1.0.
    pub fn from_hit(id: &str, meta: &BookMeta, document: &str, distance: Option<f64>) -> Self {
        let score = match distance {
            Some(d) => (1.0 - d).max(0.0),
            None => 1.0,
        };

        let summary = document
            .split_once("Rezumat:")
            .map(|(_, rest)| rest)
            .unwrap_or(document)
            .trim()
            .to_string();

        Self {
            id: id.to_string(),
            title: meta.title.clone(),
            author: meta.author.clone(),
            year: meta.year,
            themes: meta.themes.clone(),
            summary,
            score,
        }
    }
}

/// Deterministic id for an indexed document: ascii-fold, lowercase, keep
/// alphanumerics, squash separators into single dashes.
pub fn slugify(value: &str) -> String {
    let ascii: String = value.nfkd().filter(char::is_ascii).collect();

    let mut slug = String::with_capacity(ascii.len());
    for ch in ascii.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if ch == ' ' || ch == '-' || ch == '_' {
            slug.push('-');
        }
    }

    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        "id".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, author: &str) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            author: Some(author.to_string()),
            year: Some(1937),
            language: "ro".to_string(),
            summary: "Bilbo pornește la drum.\nSe întoarce schimbat.".to_string(),
            themes: Some("aventură, curaj".to_string()),
        }
    }

    #[test]
    fn slugify_strips_diacritics_and_squashes_separators() {
        assert_eq!(slugify("Stăpânul Inelelor - J.R.R. Tolkien"), "stapanul-inelelor-jrr-tolkien");
        assert_eq!(slugify("  __  "), "id");
    }

    #[test]
    fn indexed_document_id_is_deterministic() {
        let a = IndexedDocument::from_record(&record("Hobbitul", "J.R.R. Tolkien"));
        let b = IndexedDocument::from_record(&record("Hobbitul", "J.R.R. Tolkien"));
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, "hobbitul-jrr-tolkien");
    }

    #[test]
    fn document_text_carries_labeled_fields() {
        let doc = IndexedDocument::from_record(&record("Hobbitul", "J.R.R. Tolkien"));
        assert!(doc.document.starts_with("Titlu: Hobbitul\nAutor: J.R.R. Tolkien\nAn: 1937"));
        assert!(doc.document.contains("Rezumat: Bilbo pornește la drum."));
        assert_eq!(doc.metadata.themes, "aventură, curaj");
    }

    #[test]
    fn candidate_score_converts_distance() {
        let meta = BookMeta {
            title: "Hobbitul".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            year: Some(1937),
            language: "ro".to_string(),
            themes: "aventură".to_string(),
        };

        let near = Candidate::from_hit("x", &meta, "Rezumat: text", Some(0.25));
        assert!((near.score - 0.75).abs() < f64::EPSILON);

        // Distances above 1.0 clamp to zero rather than going negative.
        let far = Candidate::from_hit("x", &meta, "Rezumat: text", Some(1.4));
        assert_eq!(far.score, 0.0);

        let exact = Candidate::from_hit("x", &meta, "Rezumat: text", None);
        assert_eq!(exact.score, 1.0);
    }

    #[test]
    fn candidate_summary_is_text_after_label() {
        let meta = BookMeta {
            title: "T".to_string(),
            author: String::new(),
            year: None,
            language: "ro".to_string(),
            themes: String::new(),
        };
        let doc = "Titlu: T\nAutor: \nTeme: x\nRezumat: Prima linie.\nA doua linie.";
        let c = Candidate::from_hit("id", &meta, doc, None);
        assert_eq!(c.summary, "Prima linie.\nA doua linie.");
    }
}
