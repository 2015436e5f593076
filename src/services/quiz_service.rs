use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use validator::Validate;

use crate::{
    constants::quiz_prompt::{hint_prompt, quiz_generation_prompt},
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz},
        dto::request::GenerateQuizRequest,
    },
    repositories::QuizRepository,
    services::{completion_service::CompletionClient, quiz_generation::parse_generated_questions},
};

#[derive(Debug, Clone)]
pub struct GeneratedHint {
    pub quiz: Quiz,
    pub question: Question,
    pub hint: String,
}

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    completion: Arc<dyn CompletionClient>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            repository,
            completion,
        }
    }

    pub async fn get_quiz(&self, id: &ObjectId) -> AppResult<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }

    /// Asks the model for questions, parses them and persists the resulting quiz.
    pub async fn generate_quiz(&self, request: GenerateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let prompt = quiz_generation_prompt(
            request.difficulty,
            &request.subject,
            request.grade,
            request.total_questions,
        );

        let completion = self.completion.complete(&prompt).await?;
        let questions = parse_generated_questions(&completion).inspect_err(|e| {
            log::error!("Could not parse generated quiz: {}", e);
        })?;

        if questions.len() as i32 != request.total_questions {
            log::warn!(
                "Model returned {} questions, {} were requested",
                questions.len(),
                request.total_questions
            );
        }

        let quiz = Quiz::new(
            request.grade,
            &request.subject,
            request.total_questions,
            request.max_score,
            request.difficulty,
            questions,
        );

        let quiz = self.repository.create(quiz).await?;
        log::info!(
            "Generated quiz {} ({} grade {}, {} questions)",
            quiz.id,
            quiz.subject,
            quiz.grade,
            quiz.questions.len()
        );

        Ok(quiz)
    }

    pub async fn generate_hint(
        &self,
        quiz_id: &ObjectId,
        question_id: &ObjectId,
    ) -> AppResult<GeneratedHint> {
        let quiz = self.get_quiz(quiz_id).await?;

        let question = quiz
            .questions
            .iter()
            .find(|q| q.id == *question_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Question not found in the quiz".to_string()))?;

        let hint = self
            .completion
            .complete(&hint_prompt(&quiz, &question))
            .await?
            .trim()
            .to_string();

        log::info!("Generated hint for question {} of quiz {}", question.id, quiz.id);

        Ok(GeneratedHint {
            quiz,
            question,
            hint,
        })
    }
}
