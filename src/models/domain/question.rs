use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    pub fn new(question: &str, options: Vec<String>, correct_answer: &str) -> Self {
        Question {
            id: ObjectId::new(),
            question: question.to_string(),
            options,
            correct_answer: correct_answer.to_string(),
        }
    }
}
