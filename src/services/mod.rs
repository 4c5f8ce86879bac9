pub mod book_store;
pub mod chroma;
pub mod composer;
pub mod image_gen;
pub mod language_filter;
pub mod matcher;
pub mod openai;
pub mod recommendation;
pub mod retrieval;
pub mod tts;

// Re-export public types
pub use book_store::BookStore;
pub use chroma::ChromaClient;
pub use composer::AnswerComposer;
pub use image_gen::{ImageService, ImageSpec, OpenAiImage};
pub use openai::OpenAiClient;
pub use recommendation::{RecommendationService, SearchOutcome};
pub use retrieval::RetrievalService;
pub use tts::{OpenAiSpeech, SpeechService};
