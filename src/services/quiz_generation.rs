//! Turns free-form completion text into quiz questions.
//!
//! The model is asked for a JSON array but frequently wraps it in prose or emits
//! answer letters without quotes, so extraction is lenient: the widest `[...]` span
//! is tried first, then every `[` in order until one starts an array of questions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Question,
};

static JSON_ARRAY_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[\s\S]*\]").expect("JSON_ARRAY_SPAN is a valid regex pattern"));

static BARE_ANSWER_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r":\s*([A-D])\s*([,}])").expect("BARE_ANSWER_LETTER is a valid regex pattern")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    question: String,
    options: Vec<String>,
    #[serde(alias = "correct_answer", alias = "answer")]
    correct_answer: String,
}

impl From<GeneratedQuestion> for Question {
    fn from(generated: GeneratedQuestion) -> Self {
        Question::new(
            &generated.question,
            generated.options,
            &generated.correct_answer,
        )
    }
}

/// Quotes bare `A`-`D` answer tokens, e.g. `"correctAnswer": B}` becomes `"correctAnswer": "B"}`.
pub fn quote_bare_answer_letters(text: &str) -> String {
    BARE_ANSWER_LETTER
        .replace_all(text, r#": "$1"$2"#)
        .into_owned()
}

/// Locates the question array inside `text`.
pub fn extract_json_array(text: &str) -> AppResult<Vec<Value>> {
    let span = JSON_ARRAY_SPAN.find(text).ok_or_else(|| {
        AppError::GenerationError("No valid JSON array found in the response".to_string())
    })?;

    let repaired_span = quote_bare_answer_letters(span.as_str());
    if let Ok(items) = serde_json::from_str::<Vec<Value>>(&repaired_span) {
        return Ok(items);
    }

    let repaired_text = quote_bare_answer_letters(text);
    first_array_of::<Value>(&repaired_text)
        .or_else(|| first_array_of::<Value>(text))
        .ok_or_else(|| {
            AppError::GenerationError("No valid JSON array found in the response".to_string())
        })
}

/// First non-empty array, scanning each `[` in order, whose items all deserialize as `T`.
fn first_array_of<T: DeserializeOwned>(text: &str) -> Option<Vec<T>> {
    text.match_indices('[').find_map(|(start, _)| {
        serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<Vec<T>>()
            .next()?
            .ok()
            .filter(|items| !items.is_empty())
    })
}

fn find_question_array(text: &str) -> Option<Vec<GeneratedQuestion>> {
    let repaired = quote_bare_answer_letters(text);

    JSON_ARRAY_SPAN
        .find(&repaired)
        .and_then(|span| serde_json::from_str::<Vec<GeneratedQuestion>>(span.as_str()).ok())
        .filter(|questions| !questions.is_empty())
        .or_else(|| first_array_of::<GeneratedQuestion>(&repaired))
        .or_else(|| first_array_of::<GeneratedQuestion>(text))
}

/// Parses completion text into questions, each with a freshly minted id.
pub fn parse_generated_questions(text: &str) -> AppResult<Vec<Question>> {
    if let Some(questions) = find_question_array(text) {
        return Ok(questions.into_iter().map(Question::from).collect());
    }

    // Nothing question-shaped; re-extract leniently to report what went wrong.
    let items = extract_json_array(text)?;

    if items.is_empty() {
        return Err(AppError::GenerationError(
            "Generated question list is empty".to_string(),
        ));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<GeneratedQuestion>(item)
                .map(Question::from)
                .map_err(|e| {
                    AppError::GenerationError(format!(
                        "Generated question {} is malformed: {}",
                        index + 1,
                        e
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"[
        {"question": "2 + 2?", "options": ["A) 3", "B) 4", "C) 5", "D) 6"], "correctAnswer": "B"},
        {"question": "3 x 3?", "options": ["A) 6", "B) 8", "C) 9", "D) 12"], "correctAnswer": "C"}
    ]"#;

    #[test]
    fn parses_array_wrapped_in_prose() {
        let text = format!("Here is your quiz:\n\n{}\n\nGood luck!", WELL_FORMED);
        let questions = parse_generated_questions(&text).unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "2 + 2?");
        assert_eq!(questions[0].options.len(), 4);
        assert_eq!(questions[1].correct_answer, "C");
        assert_ne!(questions[0].id, questions[1].id);
    }

    #[test]
    fn quotes_bare_answer_letters() {
        let text = r#"[{"question": "Pick", "options": ["x", "y"], "correctAnswer": B}, {"question": "Q", "options": [], "correctAnswer" :  D , "extra": 1}]"#;
        let questions = parse_generated_questions(text).unwrap();

        assert_eq!(questions[0].correct_answer, "B");
        assert_eq!(questions[1].correct_answer, "D");
    }

    #[test]
    fn repair_leaves_quoted_answers_untouched() {
        let text = r#"{"correctAnswer": "A", "n": 1}"#;
        assert_eq!(quote_bare_answer_letters(text), text);

        assert_eq!(
            quote_bare_answer_letters(r#"{"correctAnswer": C}"#),
            r#"{"correctAnswer": "C"}"#
        );
    }

    #[test]
    fn missing_array_is_a_generation_error() {
        match parse_generated_questions("Sorry, I cannot help with that.") {
            Err(AppError::GenerationError(msg)) => {
                assert_eq!(msg, "No valid JSON array found in the response")
            }
            other => panic!("expected generation error, got {:?}", other),
        }
    }

    #[test]
    fn falls_back_to_first_well_formed_array_when_trailing_prose_has_brackets() {
        let text = format!("{} Note: answers are listed as [letter].", WELL_FORMED);
        let questions = parse_generated_questions(&text).unwrap();

        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn unbalanced_array_is_a_generation_error() {
        let result = parse_generated_questions(r#"[{"question": "unterminated" ]"#);
        assert!(matches!(result, Err(AppError::GenerationError(_))));
    }

    #[test]
    fn wrong_shape_is_a_generation_error() {
        let result = parse_generated_questions(r#"[{"prompt": "no question field"}]"#);
        assert!(matches!(result, Err(AppError::GenerationError(_))));
    }

    #[test]
    fn empty_array_is_rejected() {
        let result = parse_generated_questions("[]");
        assert!(matches!(result, Err(AppError::GenerationError(_))));
    }

    #[test]
    fn skips_bracketed_prose_before_the_question_array() {
        let text = format!("Here are [2] questions: {}", WELL_FORMED);
        let questions = parse_generated_questions(&text).unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "2 + 2?");
    }

    #[test]
    fn skips_empty_array_before_the_question_array() {
        let text = format!("Previous attempt: [] Corrected: {}", WELL_FORMED);
        let questions = parse_generated_questions(&text).unwrap();

        assert_eq!(questions.len(), 2);
    }
}
