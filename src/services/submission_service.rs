use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use mongodb::bson::oid::ObjectId;

use crate::{
    constants::quiz_prompt::improvement_tip,
    errors::{AppError, AppResult},
    models::{
        domain::{HistoryFilter, Question, QuestionResponse, Quiz, Submission},
        dto::{quiz_dto::SubmissionDto, response::SubmissionResult},
    },
    repositories::{QuizRepository, SubmissionRepository},
    services::{notification_service::ImprovementSuggestion, scoring::score_responses},
};

pub struct SubmissionService {
    quiz_repository: Arc<dyn QuizRepository>,
    submission_repository: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        submission_repository: Arc<dyn SubmissionRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            submission_repository,
        }
    }

    /// Scores and records one attempt. First attempts and retries share this path;
    /// every call stores an independent submission.
    pub async fn process_submission(
        &self,
        quiz_id: &ObjectId,
        responses: Vec<QuestionResponse>,
        user: &ObjectId,
    ) -> AppResult<SubmissionResult> {
        let quiz = self
            .quiz_repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        let (score, explanations) = score_responses(&quiz, &responses);

        let submission = Submission::new(*user, quiz.id, responses, score, explanations.clone());
        let submission = self.submission_repository.create(submission).await?;

        log::info!(
            "Recorded submission {} for quiz {}: score {}/{}",
            submission.id,
            quiz.id,
            score,
            explanations.len()
        );

        Ok(SubmissionResult {
            score,
            explanations,
        })
    }

    /// Returns the user's submissions joined with their quizzes.
    ///
    /// Score and date bounds are evaluated by the store; grade and subject are applied to
    /// the joined quiz here. Submissions whose quiz no longer exists are dropped.
    pub async fn history(
        &self,
        user: &ObjectId,
        filter: &HistoryFilter,
    ) -> AppResult<Vec<SubmissionDto>> {
        let submissions = self.submission_repository.find_for_user(user, filter).await?;
        log::debug!("Submissions found: {}", submissions.len());

        let quiz_ids: Vec<ObjectId> = submissions
            .iter()
            .map(|s| s.quiz)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let quizzes: HashMap<ObjectId, Quiz> = self
            .quiz_repository
            .find_by_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|q| (q.id, q))
            .collect();

        let history: Vec<SubmissionDto> = submissions
            .into_iter()
            .filter_map(|submission| {
                let quiz = quizzes.get(&submission.quiz)?;
                filter
                    .matches_quiz(quiz)
                    .then(|| SubmissionDto::joined(submission, quiz.clone()))
            })
            .collect();

        log::debug!("Submissions after filtering: {}", history.len());
        Ok(history)
    }

    /// Suggestions for `question` when the user's latest attempt at `quiz` got it wrong.
    pub async fn improvement_suggestions(
        &self,
        user: &ObjectId,
        quiz: &Quiz,
        question: &Question,
    ) -> AppResult<Vec<ImprovementSuggestion>> {
        let latest = self
            .submission_repository
            .find_latest_for_user_and_quiz(user, &quiz.id)
            .await?;

        let answered_wrong = latest
            .as_ref()
            .and_then(|s| s.response_for(&question.id.to_hex()))
            .is_some_and(|r| r.user_response != question.correct_answer);

        if !answered_wrong {
            return Ok(Vec::new());
        }

        Ok(vec![ImprovementSuggestion {
            question: question.question.clone(),
            correct_answer: question.correct_answer.clone(),
            tip: improvement_tip(&quiz.subject),
        }])
    }
}
