use actix_web::{web, Scope};

use crate::handlers::{health_check, history, image, ingest, search, speech};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .service(health_check)
        .service(ingest)
        .service(search)
        .service(speech)
        .service(image)
        .service(history)
}
