use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::User, dto::request::LoginRequest},
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Signs in `request.username`, registering the account on first sight.
    pub async fn login(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        if let Some(user) = self.repository.find_by_username(&request.username).await? {
            verify_password(&request.password, &user.password_hash)?;
            return Ok(user);
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(&request.username, &request.email, &password_hash);
        let user = self.repository.create(user).await?;

        log::info!("Registered new user {}", user.username);
        Ok(user)
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<()> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is invalid: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::Forbidden("Invalid credentials".to_string()))
}
