use crate::models::domain::{quiz::Difficulty, Question, QuestionResponse, Quiz, User};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn abcd() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into(), "D".into()]
    }

    /// Creates a standard test user
    pub fn test_user() -> User {
        User::new("testuser", "test@example.com", "$argon2id$placeholder")
    }

    /// Two-question quiz whose correct answers are "A" then "B"
    pub fn two_question_quiz() -> Quiz {
        Quiz::new(
            5,
            "Math",
            2,
            2,
            Difficulty::Easy,
            vec![
                Question::new("First?", abcd(), "A"),
                Question::new("Second?", abcd(), "B"),
            ],
        )
    }

    pub fn respond(question_id: String, answer: &str) -> QuestionResponse {
        QuestionResponse {
            question_id,
            user_response: answer.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_user() {
        let user = test_user();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "test@example.com");
    }

    #[test]
    fn test_fixtures_two_question_quiz() {
        let quiz = two_question_quiz();
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].correct_answer, "A");
        assert_eq!(quiz.questions[1].correct_answer, "B");
    }
}
