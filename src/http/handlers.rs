use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::{AppState, ErrorResponse};
use crate::models::PageVerse;
use crate::quiz::{self, QuizError, QuizQuestion, QuizRequest, QuizType};

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse {
    pub verses: Vec<PageVerse>,
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub async fn preflight() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Access-Control-Allow-Methods", "POST"))
        .insert_header((
            "Access-Control-Allow-Headers",
            "authorization, x-client-info, apikey, content-type",
        ))
        .body("ok")
}

pub async fn generate_quiz(
    data: web::Data<AppState>,
    req: web::Json<QuizRequest>,
) -> impl Responder {
    let request = req.into_inner();
    let (quiz_type, scope) = (request.quiz_type, request.scope);
    let source = Arc::clone(&data.source);

    let result = web::block(move || {
        let mut rng = StdRng::from_entropy();
        let questions = quiz::generate(source.as_ref(), &request, &mut rng);
        // a diacritic quiz may come back short, but not empty
        if request.quiz_type == QuizType::DiacriticQuiz {
            questions.and_then(quiz::ensure_non_empty)
        } else {
            questions
        }
    })
    .await;

    match result {
        Ok(Ok(questions)) => {
            log::info!(
                "Generated {} {} questions for {:?}",
                questions.len(),
                quiz_type,
                scope
            );
            HttpResponse::Ok().json(QuizResponse { questions })
        }
        Ok(Err(e)) => quiz_error_response(&e),
        Err(e) => {
            log::error!("Quiz worker failed: {}", e);
            database_error()
        }
    }
}

pub async fn get_page_words(
    data: web::Data<AppState>,
    req: web::Json<PageRequest>,
) -> impl Responder {
    let page_number = req.page_number;
    if page_number == 0 {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid pageNumber".to_string(),
        });
    }

    let source = Arc::clone(&data.source);
    match web::block(move || source.page_verses(page_number)).await {
        Ok(Ok(verses)) => HttpResponse::Ok().json(PageResponse { verses }),
        Ok(Err(e)) => {
            log::error!("Page {} lookup failed: {:#}", page_number, e);
            database_error()
        }
        Err(e) => {
            log::error!("Page {} worker failed: {}", page_number, e);
            database_error()
        }
    }
}

fn database_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Database error".to_string(),
    })
}

fn quiz_error_response(err: &QuizError) -> HttpResponse {
    let body = ErrorResponse {
        error: err.to_string(),
    };
    match err {
        QuizError::InvalidRequest(_) => HttpResponse::BadRequest().json(body),
        QuizError::InsufficientData { .. }
        | QuizError::PartialResult { .. }
        | QuizError::NoQuestions => {
            log::warn!("Quiz not generated: {}", err);
            HttpResponse::UnprocessableEntity().json(body)
        }
        QuizError::Source(e) => {
            log::error!("Quiz source failed: {:#}", e);
            database_error()
        }
    }
}
