use librarian_api::config::Config;
use librarian_api::error::ApiError;
use librarian_api::models::{SearchMode, SearchRequest};
use librarian_api::services::matcher::MatcherConfig;
use librarian_api::services::{
    AnswerComposer, BookStore, ChromaClient, OpenAiClient, RecommendationService, RetrievalService,
    SearchOutcome,
};
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(mock_uri: &str, database_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: database_url.to_string(),
        chroma_url: mock_uri.to_string(),
        chroma_collection: "books".to_string(),
        openai_api_key: "test-key".to_string(),
        openai_base_url: mock_uri.to_string(),
        chat_model: "gpt-4o-mini".to_string(),
        chat_temperature: 0.35,
        embedding_model: "text-embedding-3-small".to_string(),
        tts_model: "gpt-4o-mini-tts".to_string(),
        tts_voice: "alloy".to_string(),
        image_model: "gpt-image-1".to_string(),
        request_timeout_secs: 5,
        connect_timeout_secs: 5,
        matcher: MatcherConfig::default(),
    }
}

async fn mount_collection(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/collections"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "col-1", "name": "books" })),
        )
        .mount(server)
        .await;
}

fn hobbitul_row() -> (serde_json::Value, serde_json::Value, serde_json::Value) {
    (
        json!("hobbitul-jrr-tolkien"),
        json!("Titlu: Hobbitul\nAutor: J.R.R. Tolkien\nAn: 1937\nLimbă: ro\nTeme: aventură, curaj\nRezumat: Bilbo pornește la drum."),
        json!({
            "title": "Hobbitul",
            "author": "J.R.R. Tolkien",
            "year": 1937,
            "language": "ro",
            "themes": "aventură, curaj"
        }),
    )
}

fn fratia_row() -> (serde_json::Value, serde_json::Value, serde_json::Value) {
    (
        json!("stapanul-inelelor-fratia-inelului-jrr-tolkien"),
        json!("Titlu: Stăpânul Inelelor: Frăția Inelului\nAutor: J.R.R. Tolkien\nAn: 1954\nLimbă: ro\nTeme: aventură, prietenie\nRezumat: Frodo moștenește Inelul."),
        json!({
            "title": "Stăpânul Inelelor: Frăția Inelului",
            "author": "J.R.R. Tolkien",
            "year": 1954,
            "language": "ro",
            "themes": "aventură, prietenie"
        }),
    )
}

async fn mount_chat_answer(server: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": answer } }]
        })))
        .mount(server)
        .await;
}

async fn build_pipeline(server: &MockServer, database_url: &str) -> RecommendationService {
    let config = test_config(&server.uri(), database_url);
    let store = BookStore::connect(&config.database_url).await.expect("store");
    let openai = OpenAiClient::new(&config).expect("openai client");
    let chroma = ChromaClient::connect(&config).await.expect("chroma client");

    let retrieval = RetrievalService::new(chroma, openai.clone(), &config);
    let composer = AnswerComposer::new(openai);
    RecommendationService::new(retrieval, composer, store)
}

fn db_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}/test.db", dir.path().display())
}

#[tokio::test]
async fn title_exact_returns_single_full_score_candidate() {
    let server = MockServer::start().await;
    mount_collection(&server).await;

    let (id, doc, meta) = hobbitul_row();
    Mock::given(method("POST"))
        .and(path("/api/v1/collections/col-1/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ids": [id],
            "documents": [doc],
            "metadatas": [meta],
        })))
        .mount(&server)
        .await;

    mount_chat_answer(&server, "Hobbitul este alegerea perfectă pentru tine.").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = build_pipeline(&server, &db_url(&dir)).await;

    let request = SearchRequest {
        query: "Hobbitul".to_string(),
        mode: SearchMode::TitleExact,
        k: 5,
        show_all: false,
        auto_title: true,
    };

    match pipeline.search(&request).await.expect("search") {
        SearchOutcome::Completed { items, .. } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].title, "Hobbitul");
            assert_eq!(items[0].score, 1.0);
            assert_eq!(items[0].summary, "Bilbo pornește la drum.");
        }
        other => panic!("expected completed outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn title_contains_matches_regardless_of_diacritics_and_case() {
    let server = MockServer::start().await;
    mount_collection(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/collections/col-1/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(2)))
        .mount(&server)
        .await;

    let (id_a, doc_a, meta_a) = fratia_row();
    let (id_b, doc_b, meta_b) = hobbitul_row();
    Mock::given(method("POST"))
        .and(path("/api/v1/collections/col-1/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ids": [id_a, id_b],
            "documents": [doc_a, doc_b],
            "metadatas": [meta_a, meta_b],
        })))
        .mount(&server)
        .await;

    mount_chat_answer(&server, "Îți recomand Stăpânul Inelelor: Frăția Inelului.").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = build_pipeline(&server, &db_url(&dir)).await;

    let request = SearchRequest {
        query: "STAPANUL".to_string(),
        mode: SearchMode::TitleContains,
        k: 5,
        show_all: false,
        auto_title: true,
    };

    match pipeline.search(&request).await.expect("search") {
        SearchOutcome::Completed { items, .. } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].title, "Stăpânul Inelelor: Frăția Inelului");
            assert_eq!(items[0].score, 1.0);
        }
        other => panic!("expected completed outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn free_context_on_empty_index_returns_empty_list_without_error() {
    let server = MockServer::start().await;
    mount_collection(&server).await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "embedding": [0.1, 0.2, 0.3] }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/collections/col-1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ids": [[]],
            "documents": [[]],
            "metadatas": [[]],
            "distances": [[]],
        })))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), "sqlite://unused.db");
    let openai = OpenAiClient::new(&config).expect("openai client");
    let chroma = ChromaClient::connect(&config).await.expect("chroma client");
    let retrieval = RetrievalService::new(chroma, openai, &config);

    let items = retrieval
        .retrieve("o poveste despre curaj", SearchMode::FreeContext, 5, false, false)
        .await
        .expect("retrieve");

    assert!(items.is_empty());
}

#[tokio::test]
async fn auto_title_short_circuit_skips_semantic_search() {
    let server = MockServer::start().await;
    mount_collection(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/collections/col-1/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(2)))
        .mount(&server)
        .await;

    let (id_a, doc_a, meta_a) = hobbitul_row();
    let (id_b, doc_b, meta_b) = fratia_row();
    Mock::given(method("POST"))
        .and(path("/api/v1/collections/col-1/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ids": [id_a, id_b],
            "documents": [doc_a, doc_b],
            "metadatas": [meta_a, meta_b],
        })))
        .mount(&server)
        .await;

    // The embedding endpoint must never be reached.
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), "sqlite://unused.db");
    let openai = OpenAiClient::new(&config).expect("openai client");
    let chroma = ChromaClient::connect(&config).await.expect("chroma client");
    let retrieval = RetrievalService::new(chroma, openai, &config);

    let items = retrieval
        .retrieve("hobitul", SearchMode::FreeContext, 5, false, true)
        .await
        .expect("retrieve");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Hobbitul");
    assert_eq!(items[0].score, 1.0);
}

#[tokio::test]
async fn blocked_query_performs_no_retrieval_or_llm_calls() {
    let server = MockServer::start().await;
    mount_collection(&server).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let pipeline = build_pipeline(&server, &db_url(&dir)).await;

    // Everything after construction is off-limits for a blocked query.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let request = SearchRequest {
        query: "ce carte pentru un prost ca mine".to_string(),
        mode: SearchMode::FreeContext,
        k: 5,
        show_all: false,
        auto_title: true,
    };

    match pipeline.search(&request).await.expect("search") {
        SearchOutcome::Blocked { message } => {
            assert!(message.contains("prietenoasă"));
        }
        other => panic!("expected blocked outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    let mut config = test_config("http://localhost:9", "sqlite://unused.db");
    config.openai_api_key = "  ".to_string();

    match OpenAiClient::new(&config) {
        Err(ApiError::Configuration(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
        other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn unreachable_vector_store_is_a_configuration_error() {
    // Nothing listens on this port.
    let config = test_config("http://127.0.0.1:9", "sqlite://unused.db");

    match ChromaClient::connect(&config).await {
        Err(ApiError::Configuration(msg)) => assert!(msg.contains("unreachable")),
        other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
    }
}
