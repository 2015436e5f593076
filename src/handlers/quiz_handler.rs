use actix_web::{get, post, web, HttpResponse};
use mongodb::bson::oid::ObjectId;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        quiz_dto::QuizDto,
        request::{
            parse_object_id, GenerateHintRequest, GenerateQuizRequest, HistoryQuery,
            RetryQuizRequest, SubmitQuizRequest,
        },
        response::HintResponse,
    },
};

#[post("/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.generate_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(QuizDto::from(quiz)))
}

#[post("/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let quiz_id = parse_object_id("quizId", &request.quiz_id)?;
    let user_id = auth.user_id()?;

    let result = state
        .submission_service
        .process_submission(&quiz_id, request.responses, &user_id)
        .await?;

    // The result email is part of the request: a failed send fails the response.
    state
        .notification_service
        .send_quiz_result(auth.email(), &result)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

#[post("/retry/{quiz_id}")]
pub async fn retry_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<RetryQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz_id = parse_object_id("quizId", &quiz_id)?;
    let user_id = auth.user_id()?;

    let result = state
        .submission_service
        .process_submission(&quiz_id, request.into_inner().responses, &user_id)
        .await?;

    state
        .notification_service
        .send_quiz_result(auth.email(), &result)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

#[get("/history")]
pub async fn quiz_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter()?;
    let user_id = auth.user_id()?;

    let history = state.submission_service.history(&user_id, &filter).await?;
    Ok(HttpResponse::Ok().json(history))
}

#[post("/generate-hint")]
pub async fn generate_hint(
    state: web::Data<AppState>,
    request: web::Json<GenerateHintRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    let (Some(quiz_id), Some(question_id)) = (
        request.quiz_id.filter(|id| !id.trim().is_empty()),
        request.question_id.filter(|id| !id.trim().is_empty()),
    ) else {
        return Err(AppError::ValidationError(
            "quizId and questionId are required".to_string(),
        ));
    };

    let (Ok(quiz_id), Ok(question_id)) = (
        ObjectId::parse_str(quiz_id.trim()),
        ObjectId::parse_str(question_id.trim()),
    ) else {
        return Err(AppError::ValidationError(
            "Invalid quizId or questionId format".to_string(),
        ));
    };

    let user_id = auth.user_id()?;
    let generated = state
        .quiz_service
        .generate_hint(&quiz_id, &question_id)
        .await?;

    let response = HintResponse {
        message: "Hint generated successfully".to_string(),
        question: generated.question.question.clone(),
        hint: generated.hint.clone(),
    };

    // Improvement email is best-effort and never delays or fails the hint response.
    let email = auth.email().to_string();
    actix_web::rt::spawn(async move {
        let suggestions = match state
            .submission_service
            .improvement_suggestions(&user_id, &generated.quiz, &generated.question)
            .await
        {
            Ok(suggestions) => suggestions,
            Err(e) => {
                log::warn!("Could not evaluate improvement suggestions: {}", e);
                return;
            }
        };

        if suggestions.is_empty() {
            return;
        }

        if let Err(e) = state
            .notification_service
            .send_improvement(&email, &suggestions)
            .await
        {
            log::warn!("Improvement email was not delivered: {}", e);
        }
    });

    Ok(HttpResponse::Ok().json(response))
}
