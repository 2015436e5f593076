use std::fmt;

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::domain::question::Question;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub grade: i32,
    pub subject: String,
    pub total_questions: i32,
    pub max_score: i32,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        };
        f.write_str(label)
    }
}

impl Quiz {
    pub fn new(
        grade: i32,
        subject: &str,
        total_questions: i32,
        max_score: i32,
        difficulty: Difficulty,
        questions: Vec<Question>,
    ) -> Self {
        let now = DateTime::now();
        Quiz {
            id: ObjectId::new(),
            grade,
            subject: subject.to_string(),
            total_questions,
            max_score,
            difficulty,
            questions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Looks up a question by the hex form of its id.
    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|q| q.id.to_hex() == question_id)
    }
}
