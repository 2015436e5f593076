use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizRepository, MongoSubmissionRepository, MongoUserRepository, QuizRepository,
        SubmissionRepository, UserRepository,
    },
    services::{
        completion_service::{CompletionClient, GroqCompletionClient},
        email_service::{Mailer, ResendMailer},
        notification_service::NotificationService,
        quiz_service::QuizService,
        submission_service::SubmissionService,
        user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub submission_service: Arc<SubmissionService>,
    pub notification_service: Arc<NotificationService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

/// Storage and external clients the services are wired from.
pub struct Collaborators {
    pub users: Arc<dyn UserRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub completion: Arc<dyn CompletionClient>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db, &config.users_collection));
        user_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config.quizzes_collection));

        let submission_repository = Arc::new(MongoSubmissionRepository::new(
            &db,
            &config.submissions_collection,
        ));
        submission_repository.ensure_indexes().await?;

        let completion = Arc::new(GroqCompletionClient::new(
            &config.groq_api_key,
            &config.groq_api_base,
            &config.groq_model,
        ));
        let mailer = Arc::new(ResendMailer::new(
            config.resend_api_key.clone(),
            &config.resend_api_base,
        ));

        Ok(Self::from_parts(
            config,
            Collaborators {
                users: user_repository,
                quizzes: quiz_repository,
                submissions: submission_repository,
                completion,
                mailer,
            },
        ))
    }

    pub fn from_parts(config: Config, parts: Collaborators) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        Self {
            user_service: Arc::new(UserService::new(parts.users)),
            quiz_service: Arc::new(QuizService::new(parts.quizzes.clone(), parts.completion)),
            submission_service: Arc::new(SubmissionService::new(
                parts.quizzes,
                parts.submissions,
            )),
            notification_service: Arc::new(NotificationService::new(
                parts.mailer,
                &config.email_from,
            )),
            jwt_service,
            config: Arc::new(config),
        }
    }
}
