pub mod ingest_books;
pub mod seed_data;

pub use ingest_books::{ingest_books, IngestReport};
pub use seed_data::seed_books;
