use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Transactional email transport. Returns the provider's message id.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

pub struct ResendMailer {
    client: reqwest::Client,
    api_key: SecretString,
    api_base: String,
}

impl ResendMailer {
    pub fn new(api_key: SecretString, api_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> AppResult<String> {
        let response = self
            .client
            .post(format!("{}/emails", self.api_base))
            .bearer_auth(self.api_key.expose_secret())
            .json(&email)
            .send()
            .await
            .map_err(|e| AppError::EmailError(format!("Failed to reach email API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            return Err(AppError::EmailError(format!(
                "Email API responded with {}: {}",
                status, body
            )));
        }

        let sent = response
            .json::<SendEmailResponse>()
            .await
            .map_err(|e| AppError::EmailError(format!("Unexpected email API response: {}", e)))?;

        Ok(sent.id)
    }
}
