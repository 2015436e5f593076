use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{
    quiz::Difficulty, Explanation, Question, QuestionResponse, Quiz, Submission,
};

pub(crate) fn to_utc(at: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis()).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: question.id.to_hex(),
            question: question.question,
            options: question.options,
            correct_answer: question.correct_answer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub grade: i32,
    pub subject: String,
    pub total_questions: i32,
    pub max_score: i32,
    pub difficulty: Difficulty,
    pub questions: Vec<QuestionDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        QuizDto {
            id: quiz.id.to_hex(),
            grade: quiz.grade,
            subject: quiz.subject,
            total_questions: quiz.total_questions,
            max_score: quiz.max_score,
            difficulty: quiz.difficulty,
            questions: quiz.questions.into_iter().map(QuestionDto::from).collect(),
            created_at: to_utc(quiz.created_at),
            updated_at: to_utc(quiz.updated_at),
        }
    }
}

/// A history entry: the submission with its quiz embedded in place of the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub quiz: QuizDto,
    pub responses: Vec<QuestionResponse>,
    pub score: i32,
    pub explanations: Vec<Explanation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmissionDto {
    pub fn joined(submission: Submission, quiz: Quiz) -> Self {
        SubmissionDto {
            id: submission.id.to_hex(),
            user: submission.user.to_hex(),
            quiz: quiz.into(),
            responses: submission.responses,
            score: submission.score,
            explanations: submission.explanations,
            created_at: to_utc(submission.created_at),
            updated_at: to_utc(submission.updated_at),
        }
    }
}
