use std::sync::Arc;

use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::dto::response::SubmissionResult,
    services::email_service::{Mailer, OutgoingEmail},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementSuggestion {
    pub question: String,
    pub correct_answer: String,
    pub tip: String,
}

pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    from: String,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>, from: &str) -> Self {
        Self {
            mailer,
            from: from.to_string(),
        }
    }

    pub async fn send_quiz_result(&self, to: &str, result: &SubmissionResult) -> AppResult<String> {
        let email = OutgoingEmail {
            from: self.from.clone(),
            to: to.to_string(),
            subject: "Your Quiz Results".to_string(),
            html: render_quiz_result(result),
        };

        match self.mailer.send(email).await {
            Ok(id) => {
                log::info!("Quiz result email sent successfully: {}", id);
                Ok(id)
            }
            Err(e) => {
                log::error!("Error sending quiz result email: {}", e);
                Err(AppError::EmailError(
                    "Quiz result email sending failed.".to_string(),
                ))
            }
        }
    }

    pub async fn send_improvement(
        &self,
        to: &str,
        suggestions: &[ImprovementSuggestion],
    ) -> AppResult<String> {
        let email = OutgoingEmail {
            from: self.from.clone(),
            to: to.to_string(),
            subject: "Suggestions for Improvement".to_string(),
            html: render_improvement(suggestions),
        };

        match self.mailer.send(email).await {
            Ok(id) => {
                log::info!("Improvement email sent successfully: {}", id);
                Ok(id)
            }
            Err(e) => {
                log::error!("Error sending improvement email: {}", e);
                Err(AppError::EmailError(
                    "Improvement email sending failed.".to_string(),
                ))
            }
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_quiz_result(result: &SubmissionResult) -> String {
    let items: String = result
        .explanations
        .iter()
        .map(|exp| {
            let options = exp
                .options
                .iter()
                .map(|o| escape_html(o))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "<li>\
                 <p><strong>Question:</strong> {}</p>\
                 <p><strong>Options:</strong> {}</p>\
                 <p><strong>Your Response:</strong> {}</p>\
                 <p><strong>Correct Answer:</strong> {}</p>\
                 </li>",
                escape_html(&exp.question),
                options,
                escape_html(&exp.user_response),
                escape_html(&exp.correct_answer),
            )
        })
        .collect();

    format!(
        "<h1>Quiz Results</h1>\
         <p><strong>Your Score:</strong> {} out of {}</p>\
         <h2>Explanations</h2>\
         <ul>{}</ul>",
        result.score,
        result.explanations.len(),
        items
    )
}

pub fn render_improvement(suggestions: &[ImprovementSuggestion]) -> String {
    let items: String = suggestions
        .iter()
        .map(|s| {
            format!(
                "<li>\
                 <p><strong>Question:</strong> {}</p>\
                 <p><strong>Correct Answer:</strong> {}</p>\
                 <p><strong>Tip:</strong> {}</p>\
                 </li>",
                escape_html(&s.question),
                escape_html(&s.correct_answer),
                escape_html(&s.tip),
            )
        })
        .collect();

    format!(
        "<h1>Improvement Suggestions</h1>\
         <p>We noticed some areas where you can improve. Here are our suggestions:</p>\
         <ul>{}</ul>",
        items
    )
}
