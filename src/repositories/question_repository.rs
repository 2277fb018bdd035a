use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerOption, Question},
        ids::{QuestionId, QuizId},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_by_id(&self, id: QuestionId) -> AppResult<Option<Question>>;
    async fn list_by_quiz(&self, quiz_id: QuizId) -> AppResult<Vec<Question>>;
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn update(&self, question: Question) -> AppResult<Question>;
    /// Removes the question and its answer options.
    async fn delete(&self, id: QuestionId) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
    answer_options: Collection<AnswerOption>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let names = db.collection_names();
        Self {
            collection: db.get_collection(&names.questions),
            answer_options: db.get_collection(&names.answer_options),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(quiz_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find_by_id(&self, id: QuestionId) -> AppResult<Option<Question>> {
        let question = self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?;
        Ok(question)
    }

    async fn list_by_quiz(&self, quiz_id: QuizId) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "quiz_id": quiz_id.to_string() })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let result = self
            .collection
            .replace_one(doc! { "id": question.id.to_string() }, &question)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        }

        Ok(question)
    }

    async fn delete(&self, id: QuestionId) -> AppResult<()> {
        self.answer_options
            .delete_many(doc! { "question_id": id.to_string() })
            .await?;

        let result = self
            .collection
            .delete_one(doc! { "id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
