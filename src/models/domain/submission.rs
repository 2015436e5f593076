use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user: ObjectId,
    pub quiz: ObjectId,
    pub responses: Vec<QuestionResponse>,
    pub score: i32,
    pub explanations: Vec<Explanation>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: String,
    pub user_response: String,
}

/// Feedback entry pairing the submitted answer with the correct one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub question: String,
    pub options: Vec<String>,
    pub user_response: String,
    pub correct_answer: String,
}

impl Submission {
    pub fn new(
        user: ObjectId,
        quiz: ObjectId,
        responses: Vec<QuestionResponse>,
        score: i32,
        explanations: Vec<Explanation>,
    ) -> Self {
        let now = DateTime::now();
        Submission {
            id: ObjectId::new(),
            user,
            quiz,
            responses,
            score,
            explanations,
            created_at: now,
            updated_at: now,
        }
    }

    /// The answer given to `question_id`, if the submission contains one.
    pub fn response_for(&self, question_id: &str) -> Option<&QuestionResponse> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_round_trips_through_bson() {
        let submission = Submission::new(
            ObjectId::new(),
            ObjectId::new(),
            vec![QuestionResponse {
                question_id: "q1".to_string(),
                user_response: "A".to_string(),
            }],
            1,
            vec![Explanation {
                question: "Pick A".to_string(),
                options: vec!["A".to_string(), "B".to_string()],
                user_response: "A".to_string(),
                correct_answer: "A".to_string(),
            }],
        );

        let doc = mongodb::bson::to_document(&submission).unwrap();
        assert!(doc.contains_key("createdAt"));
        assert_eq!(doc.get_i32("score").unwrap(), 1);

        let parsed: Submission = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(parsed, submission);
    }

    #[test]
    fn response_for_finds_matching_question() {
        let submission = Submission::new(
            ObjectId::new(),
            ObjectId::new(),
            vec![
                QuestionResponse {
                    question_id: "q1".to_string(),
                    user_response: "A".to_string(),
                },
                QuestionResponse {
                    question_id: "q2".to_string(),
                    user_response: "C".to_string(),
                },
            ],
            0,
            vec![],
        );

        assert_eq!(submission.response_for("q2").unwrap().user_response, "C");
        assert!(submission.response_for("q3").is_none());
    }
}
