use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};

use crate::{db::Database, errors::AppResult, models::domain::Quiz};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Quiz>>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Quiz>>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(quiz)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Quiz>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let quizzes = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }
}
