pub mod health;
// These handlers use actix route macros (#[get]/#[post]) which generate a
// struct with the same name as the fn. Bind the modules under distinct names
// so the re-exported route structs below can own `history`/`ingest`/`search`.
#[path = "history.rs"]
mod history_handler;
#[path = "ingest.rs"]
mod ingest_handler;
pub mod media;
#[path = "search.rs"]
mod search_handler;

pub use health::health_check;
pub use history_handler::history;
pub use ingest_handler::ingest;
pub use media::{image, speech};
pub use search_handler::search;
