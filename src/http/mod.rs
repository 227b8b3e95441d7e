pub mod handlers;

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::http::Method;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use serde::Serialize;

use crate::store::QuizSource;

pub struct AppState {
    pub source: Arc<dyn QuizSource + Send + Sync>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn run(
    listener: TcpListener,
    source: Arc<dyn QuizSource + Send + Sync>,
) -> Result<Server, std::io::Error> {
    let data = web::Data::new(AppState { source });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(json_config())
            .wrap(middleware::Logger::default())
            .wrap(middleware::DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .route("/health", web::get().to(handlers::health_check))
            .route("/generate-quiz", web::post().to(handlers::generate_quiz))
            .route("/generate-quiz", web::method(Method::OPTIONS).to(handlers::preflight))
            .route("/get-page-words", web::post().to(handlers::get_page_words))
            .route("/get-page-words", web::method(Method::OPTIONS).to(handlers::preflight))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Malformed bodies get the same `{"error": ...}` shape as every other failure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse {
            error: format!("Invalid request: {err}"),
        };
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}
