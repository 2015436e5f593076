pub mod auth_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use auth_handler::login;
pub use health_handler::health_check;
pub use quiz_handler::{generate_hint, generate_quiz, quiz_history, retry_quiz, submit_quiz};

/// Registers every route. Everything under `/quiz` requires a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(health_check)
        .service(login)
        .service(
            web::scope("/quiz")
                .wrap(AuthMiddleware)
                .service(generate_quiz)
                .service(submit_quiz)
                .service(retry_quiz)
                .service(quiz_history)
                .service(generate_hint),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
