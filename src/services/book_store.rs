use crate::error::Result;
use crate::models::{BookRecord, SearchHistory};
use chrono::Utc;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

/// SQLite-backed record store for canonical book summaries and the search
/// history log.
#[derive(Debug, Clone)]
pub struct BookStore {
    pool: SqlitePool,
}

impl BookStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS book_summaries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE,
                author TEXT,
                year INTEGER,
                language TEXT DEFAULT 'ro',
                summary TEXT NOT NULL,
                themes TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS search_history (
                id TEXT PRIMARY KEY,
                query TEXT NOT NULL,
                mode TEXT NOT NULL,
                results INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or refresh records, keyed by the unique title.
    pub async fn upsert_books(&self, books: &[BookRecord]) -> Result<usize> {
        for book in books {
            sqlx::query(
                r#"
                INSERT INTO book_summaries (title, author, year, language, summary, themes)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(title) DO UPDATE SET
                    author = excluded.author,
                    year = excluded.year,
                    language = excluded.language,
                    summary = excluded.summary,
                    themes = excluded.themes
                "#,
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.year)
            .bind(&book.language)
            .bind(&book.summary)
            .bind(&book.themes)
            .execute(&self.pool)
            .await?;
        }

        info!("Upserted {} book records", books.len());
        Ok(books.len())
    }

    pub async fn all_books(&self) -> Result<Vec<BookRecord>> {
        let books = sqlx::query_as::<_, BookRecord>(
            "SELECT title, author, year, language, summary, themes FROM book_summaries ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_summaries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn record_search(&self, query: &str, mode: &str, results: usize) -> Result<()> {
        sqlx::query(
            "INSERT INTO search_history (id, query, mode, results, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(Uuid::new_v4())
        .bind(query)
        .bind(mode)
        .bind(results as i64)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn recent_searches(&self, limit: i64) -> Result<Vec<SearchHistory>> {
        let rows = sqlx::query_as::<_, SearchHistory>(
            "SELECT id, query, mode, results, created_at FROM search_history ORDER BY created_at DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripts::seed_data::seed_books;

    async fn temp_store() -> (tempfile::TempDir, BookStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}/books.db", dir.path().display());
        let store = BookStore::connect(&url).await.expect("connect");
        (dir, store)
    }

    #[tokio::test]
    async fn seeding_is_idempotent_on_title() {
        let (_dir, store) = temp_store().await;
        let books = seed_books();

        store.upsert_books(&books).await.expect("first upsert");
        store.upsert_books(&books).await.expect("second upsert");

        assert_eq!(store.count().await.expect("count"), books.len() as i64);
    }

    #[tokio::test]
    async fn upsert_replaces_fields_for_existing_title() {
        let (_dir, store) = temp_store().await;
        let mut books = seed_books();
        store.upsert_books(&books).await.expect("upsert");

        books[0].summary = "Rezumat revizuit.".to_string();
        store.upsert_books(&books[..1]).await.expect("update");

        let stored = store.all_books().await.expect("all");
        let updated = stored
            .iter()
            .find(|b| b.title == books[0].title)
            .expect("record present");
        assert_eq!(updated.summary, "Rezumat revizuit.");
    }

    #[tokio::test]
    async fn search_history_round_trip() {
        let (_dir, store) = temp_store().await;
        store
            .record_search("hobbitul", "title_exact", 1)
            .await
            .expect("record");

        let rows = store.recent_searches(10).await.expect("recent");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].query, "hobbitul");
        assert_eq!(rows[0].mode, "title_exact");
        assert_eq!(rows[0].results, 1);
    }
}
