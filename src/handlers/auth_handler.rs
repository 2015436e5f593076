use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::LoginRequest, response::LoginResponse},
};

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.login(request.into_inner()).await?;
    let token = state.jwt_service.create_token(&user)?;

    log::info!("Issued token for user {}", user.username);

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
