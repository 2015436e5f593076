#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mockall::mock;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use quizmaster_server::{
    app_state::{AppState, Collaborators},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{quiz::Difficulty, HistoryFilter, Question, Quiz, Submission, User},
    repositories::{QuizRepository, SubmissionRepository, UserRepository},
    services::{
        completion_service::CompletionClient,
        email_service::{Mailer, OutgoingEmail},
    },
};

mock! {
    pub Completion {}

    #[async_trait]
    impl CompletionClient for Completion {
        async fn complete(&self, prompt: &str) -> AppResult<String>;
    }
}

mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, email: OutgoingEmail) -> AppResult<String>;
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users_by_username: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users_by_username.write().await;
        if users.contains_key(&user.username) {
            return Err(AppError::DatabaseError(format!(
                "duplicate key: username '{}'",
                user.username
            )));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users_by_username.read().await;
        Ok(users.get(username).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<ObjectId, Quiz>>,
}

impl InMemoryQuizRepository {
    pub async fn remove(&self, id: &ObjectId) {
        self.quizzes.write().await.remove(id);
    }

    pub async fn count(&self) -> usize {
        self.quizzes.read().await.len()
    }

    pub async fn all(&self) -> Vec<Quiz> {
        self.quizzes.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes.write().await.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(ids.iter().filter_map(|id| quizzes.get(id).cloned()).collect())
    }
}

#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: RwLock<Vec<Submission>>,
}

impl InMemorySubmissionRepository {
    pub async fn all(&self) -> Vec<Submission> {
        self.submissions.read().await.clone()
    }

    pub async fn insert(&self, submission: Submission) {
        self.submissions.write().await.push(submission);
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.submissions.write().await.push(submission.clone());
        Ok(submission)
    }

    async fn find_for_user(
        &self,
        user: &ObjectId,
        filter: &HistoryFilter,
    ) -> AppResult<Vec<Submission>> {
        let submissions = self.submissions.read().await;
        let mut items: Vec<_> = submissions
            .iter()
            .filter(|s| s.user == *user && filter.matches_submission(s))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find_latest_for_user_and_quiz(
        &self,
        user: &ObjectId,
        quiz: &ObjectId,
    ) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .iter()
            .filter(|s| s.user == *user && s.quiz == *quiz)
            .max_by_key(|s| s.created_at)
            .cloned())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
}

impl TestContext {
    pub fn new(completion: MockCompletion, mailer: MockMailer) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let quizzes = Arc::new(InMemoryQuizRepository::default());
        let submissions = Arc::new(InMemorySubmissionRepository::default());

        let state = AppState::from_parts(
            Config::test_config(),
            Collaborators {
                users: users.clone(),
                quizzes: quizzes.clone(),
                submissions: submissions.clone(),
                completion: Arc::new(completion),
                mailer: Arc::new(mailer),
            },
        );

        Self {
            state,
            users,
            quizzes,
            submissions,
        }
    }

    /// Context whose collaborators must not be touched.
    pub fn untouched() -> Self {
        let mut completion = MockCompletion::new();
        completion.expect_complete().never();
        let mut mailer = MockMailer::new();
        mailer.expect_send().never();
        Self::new(completion, mailer)
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state
            .jwt_service
            .create_token(user)
            .expect("token should be issued")
    }

    pub async fn seed_quiz(&self, quiz: Quiz) -> Quiz {
        self.quizzes.create(quiz).await.expect("quiz should be stored")
    }
}

pub fn abcd() -> Vec<String> {
    vec!["A".into(), "B".into(), "C".into(), "D".into()]
}

pub fn student() -> User {
    User::new("student", "student@example.com", "$argon2id$placeholder")
}

pub fn quiz(grade: i32, subject: &str, answers: &[&str]) -> Quiz {
    let questions = answers
        .iter()
        .enumerate()
        .map(|(i, answer)| Question::new(&format!("Question {}?", i + 1), abcd(), answer))
        .collect::<Vec<_>>();
    Quiz::new(
        grade,
        subject,
        questions.len() as i32,
        questions.len() as i32,
        Difficulty::Medium,
        questions,
    )
}

pub fn mailer_accepting_any() -> MockMailer {
    let mut mailer = MockMailer::new();
    mailer
        .expect_send()
        .returning(|_| Ok("email-id".to_string()));
    mailer
}
