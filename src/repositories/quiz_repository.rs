use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerOption, Question, Quiz},
        ids::{PrincipalId, QuizId},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: QuizId) -> AppResult<Option<Quiz>>;
    async fn list_by_owner(&self, owner_id: PrincipalId) -> AppResult<Vec<Quiz>>;
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Removes the quiz together with its questions and their options.
    async fn delete(&self, id: QuizId) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
    questions: Collection<Question>,
    answer_options: Collection<AnswerOption>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let names = db.collection_names();
        Self {
            collection: db.get_collection(&names.quizzes),
            questions: db.get_collection(&names.questions),
            answer_options: db.get_collection(&names.answer_options),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1 })
            .options(IndexOptions::builder().name("owner_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: QuizId) -> AppResult<Option<Quiz>> {
        let quiz = self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?;
        Ok(quiz)
    }

    async fn list_by_owner(&self, owner_id: PrincipalId) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "owner_id": owner_id.to_string() })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let result = self
            .collection
            .replace_one(doc! { "id": quiz.id.to_string() }, &quiz)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz.id
            )));
        }

        Ok(quiz)
    }

    async fn delete(&self, id: QuizId) -> AppResult<()> {
        let quiz_filter = doc! { "quiz_id": id.to_string() };
        let question_ids = self.questions.distinct("id", quiz_filter.clone()).await?;

        self.answer_options
            .delete_many(doc! { "question_id": { "$in": question_ids } })
            .await?;
        self.questions.delete_many(quiz_filter).await?;

        let result = self
            .collection
            .delete_one(doc! { "id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        Ok(())
    }
}
