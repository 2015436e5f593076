use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub users_collection: String,
    pub quizzes_collection: String,
    pub submissions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub groq_api_key: SecretString,
    pub groq_api_base: String,
    pub groq_model: String,
    pub resend_api_key: SecretString,
    pub resend_api_base: String,
    pub email_from: String,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quizmaster-local".to_string()),
            users_collection: env::var("USERS_COLLECTION").unwrap_or_else(|_| "users".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            submissions_collection: env::var("SUBMISSIONS_COLLECTION")
                .unwrap_or_else(|_| "submissions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(1),
            groq_api_key: SecretString::from(env::var("GROQ_API_KEY").unwrap_or_default()),
            groq_api_base: env::var("GROQ_API_BASE")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            groq_model: env::var("GROQ_MODEL").unwrap_or_else(|_| "llama3-8b-8192".to_string()),
            resend_api_key: SecretString::from(env::var("RESEND_API_KEY").unwrap_or_default()),
            resend_api_base: env::var("RESEND_API_BASE")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "onboarding@project0x.org".to_string()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects configurations that still carry development defaults for secrets.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using default value! Set JWT_SECRET to a secure random string."
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}). Must be at least 32 characters.",
                jwt_secret.len()
            )));
        }

        if self.groq_api_key.expose_secret().is_empty() {
            return Err(AppError::InternalError(
                "GROQ_API_KEY is not set".to_string(),
            ));
        }

        if self.resend_api_key.expose_secret().is_empty() {
            return Err(AppError::InternalError(
                "RESEND_API_KEY is not set".to_string(),
            ));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizmaster-test".to_string(),
            users_collection: "users".to_string(),
            quizzes_collection: "quizzes".to_string(),
            submissions_collection: "submissions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            groq_api_key: SecretString::from("test_groq_key".to_string()),
            groq_api_base: "http://localhost:9999/openai/v1".to_string(),
            groq_model: "llama3-8b-8192".to_string(),
            resend_api_key: SecretString::from("test_resend_key".to_string()),
            resend_api_base: "http://localhost:9998".to_string(),
            email_from: "onboarding@project0x.org".to_string(),
            app_env: "test".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(!config.groq_api_base.is_empty());
        assert!(config.jwt_expiration_hours > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "quizmaster-test");
        assert_eq!(config.quizzes_collection, "quizzes");
        assert_eq!(config.submissions_collection, "submissions");
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_validation_rejects_short_secret() {
        let config = Config::test_config();
        assert!(matches!(
            config.validate_for_production(),
            Err(AppError::InternalError(_))
        ));
    }

    #[test]
    fn test_production_validation_accepts_strong_config() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from("a".repeat(48));
        config.app_env = "production".to_string();

        assert!(config.is_production());
        assert!(config.validate_for_production().is_ok());
    }
}
