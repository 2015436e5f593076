use chrono::{DateTime, NaiveDate};
use mongodb::bson::{self, oid::ObjectId};
use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{
    quiz::Difficulty, DateRange, HistoryFilter, QuestionResponse, ScoreFilter,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    #[serde(default)]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[validate(range(min = 1))]
    pub grade: i32,

    #[validate(length(min = 1))]
    pub subject: String,

    #[validate(range(min = 1))]
    pub total_questions: i32,

    #[validate(range(min = 1))]
    pub max_score: i32,

    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub quiz_id: String,
    pub responses: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryQuizRequest {
    pub responses: Vec<QuestionResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateHintRequest {
    #[serde(default)]
    pub quiz_id: Option<String>,
    #[serde(default)]
    pub question_id: Option<String>,
}

/// Raw `/quiz/history` query string. Values stay textual until [`HistoryQuery::into_filter`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub score: Option<String>,
    pub min_score: Option<String>,
    pub max_score: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl HistoryQuery {
    pub fn into_filter(self) -> AppResult<HistoryFilter> {
        let score = ScoreFilter::resolve(
            parse_int("score", self.score.as_deref())?,
            parse_int("minScore", self.min_score.as_deref())?,
            parse_int("maxScore", self.max_score.as_deref())?,
        );

        // Only a complete window filters; a lone bound is ignored.
        let created = match (self.from.as_deref(), self.to.as_deref()) {
            (Some(from), Some(to)) => Some(DateRange {
                from: parse_date("from", from)?,
                to: parse_date("to", to)?,
            }),
            _ => None,
        };

        Ok(HistoryFilter {
            score,
            created,
            grade: parse_int("grade", self.grade.as_deref())?,
            subject: self.subject,
        })
    }
}

/// Parses a client-supplied identifier, rejecting anything that is not a 24-hex ObjectId.
pub fn parse_object_id(field: &str, value: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("Invalid {} format", field)))
}

fn parse_int(field: &str, value: Option<&str>) -> AppResult<Option<i32>> {
    value
        .map(|v| {
            v.trim().parse::<i32>().map_err(|_| {
                AppError::ValidationError(format!("{} must be an integer, got '{}'", field, v))
            })
        })
        .transpose()
}

fn parse_date(field: &str, value: &str) -> AppResult<bson::DateTime> {
    let trimmed = value.trim();

    let millis = if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        dt.timestamp_millis()
    } else if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .ok_or_else(|| AppError::ValidationError(format!("Invalid {} date", field)))?
    } else {
        return Err(AppError::ValidationError(format!(
            "Invalid {} date '{}': expected RFC 3339 or YYYY-MM-DD",
            field, value
        )));
    };

    Ok(bson::DateTime::from_millis(millis))
}
