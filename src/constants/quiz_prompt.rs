use crate::models::domain::{quiz::Difficulty, Question, Quiz};

pub const HINT_TIP_PREFIX: &str = "Focus on the key concepts in";

pub fn quiz_generation_prompt(
    difficulty: Difficulty,
    subject: &str,
    grade: i32,
    total_questions: i32,
) -> String {
    format!(
        "Generate a {difficulty} {subject} quiz for grade {grade} with {total_questions} questions. \
         Each question should have 4 options (A, B, C, D) and one correct answer. \
         Format the response as a JSON array of objects, each with 'question', 'options', and \
         'correctAnswer' fields."
    )
}

pub fn hint_prompt(quiz: &Quiz, question: &Question) -> String {
    format!(
        "Provide a hint for the following question from a {} quiz for grade {}: \"{}\"",
        quiz.subject, quiz.grade, question.question
    )
}

pub fn improvement_tip(subject: &str) -> String {
    format!("{} {}.", HINT_TIP_PREFIX, subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_prompt_names_every_parameter() {
        let prompt = quiz_generation_prompt(Difficulty::Hard, "Physics", 9, 5);

        assert!(prompt.starts_with("Generate a HARD Physics quiz for grade 9 with 5 questions."));
        assert!(prompt.contains("4 options (A, B, C, D)"));
        assert!(prompt.contains("'correctAnswer'"));
    }

    #[test]
    fn hint_prompt_quotes_the_question() {
        let question = Question::new("What is 7 x 8?", vec![], "56");
        let quiz = Quiz::new(3, "Math", 1, 1, Difficulty::Easy, vec![question.clone()]);

        assert_eq!(
            hint_prompt(&quiz, &question),
            "Provide a hint for the following question from a Math quiz for grade 3: \"What is 7 x 8?\""
        );
        assert_eq!(improvement_tip("Math"), "Focus on the key concepts in Math.");
    }
}
