use crate::{
    config::Config,
    error::Result,
    routes::api_routes,
    services::{
        AnswerComposer, BookStore, ChromaClient, ImageService, OpenAiClient, OpenAiImage,
        OpenAiSpeech, RecommendationService, RetrievalService, SpeechService,
    },
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::net::TcpListener;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for container compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // Initialize collaborators; unreachable backends fail here, not at
        // query time.
        let store = BookStore::connect(&self.config.database_url).await?;
        let openai = OpenAiClient::new(&self.config)?;
        let chroma = ChromaClient::connect(&self.config).await?;

        let retrieval = RetrievalService::new(chroma.clone(), openai.clone(), &self.config);
        let composer = AnswerComposer::new(openai.clone());
        let recommendation = web::Data::new(RecommendationService::new(
            retrieval,
            composer,
            store.clone(),
        ));

        let speech_service = web::Data::new(SpeechService::new(
            vec![Box::new(OpenAiSpeech::new(openai.clone()))],
            self.config.tts_voice.clone(),
        ));
        let image_service = web::Data::new(ImageService::new(vec![Box::new(OpenAiImage::new(
            openai.clone(),
        ))]));

        let store_data = web::Data::new(store);
        let chroma_data = web::Data::new(chroma);
        let openai_data = web::Data::new(openai);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation.clone())
                .app_data(speech_service.clone())
                .app_data(image_service.clone())
                .app_data(store_data.clone())
                .app_data(chroma_data.clone())
                .app_data(openai_data.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
