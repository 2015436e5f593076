use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{HistoryFilter, Submission},
};

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    /// Submissions owned by `user` that satisfy the score/date part of `filter`, newest first.
    async fn find_for_user(
        &self,
        user: &ObjectId,
        filter: &HistoryFilter,
    ) -> AppResult<Vec<Submission>>;
    async fn find_latest_for_user_and_quiz(
        &self,
        user: &ObjectId,
        quiz: &ObjectId,
    ) -> AppResult<Option<Submission>>;
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        let user_created_index = IndexModel::builder()
            .keys(doc! { "user": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_created_at".to_string())
                    .build(),
            )
            .build();

        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user": 1, "quiz": 1 })
            .options(IndexOptions::builder().name("user_quiz".to_string()).build())
            .build();

        self.collection.create_index(user_created_index).await?;
        self.collection.create_index(user_quiz_index).await?;

        log::info!("Successfully created indexes for submissions collection");
        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn find_for_user(
        &self,
        user: &ObjectId,
        filter: &HistoryFilter,
    ) -> AppResult<Vec<Submission>> {
        let query = filter.submission_document(user);
        log::debug!("Submission query: {}", query);

        let submissions = self
            .collection
            .find(query)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(submissions)
    }

    async fn find_latest_for_user_and_quiz(
        &self,
        user: &ObjectId,
        quiz: &ObjectId,
    ) -> AppResult<Option<Submission>> {
        let submission = self
            .collection
            .find_one(doc! { "user": *user, "quiz": *quiz })
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(submission)
    }
}
