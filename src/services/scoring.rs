use crate::models::domain::{Explanation, QuestionResponse, Quiz};

/// Scores `responses` against `quiz`.
///
/// Each response naming a question of the quiz earns one point when it matches the
/// correct answer exactly and always yields an explanation. Responses naming unknown
/// questions are skipped.
pub fn score_responses(quiz: &Quiz, responses: &[QuestionResponse]) -> (i32, Vec<Explanation>) {
    let mut score = 0;
    let mut explanations = Vec::with_capacity(responses.len());

    for response in responses {
        let Some(question) = quiz.find_question(&response.question_id) else {
            continue;
        };

        if question.correct_answer == response.user_response {
            score += 1;
        }

        explanations.push(Explanation {
            question: question.question.clone(),
            options: question.options.clone(),
            user_response: response.user_response.clone(),
            correct_answer: question.correct_answer.clone(),
        });
    }

    (score, explanations)
}
