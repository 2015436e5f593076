use serde::{Deserialize, Serialize};

use crate::models::domain::Explanation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Outcome of scoring one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub score: i32,
    pub explanations: Vec<Explanation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintResponse {
    pub message: String,
    pub question: String,
    pub hint: String,
}
