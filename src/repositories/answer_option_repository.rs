use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::{
        domain::AnswerOption,
        ids::{AnswerOptionId, QuestionId},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerOptionRepository: Send + Sync {
    async fn find_by_id(&self, id: AnswerOptionId) -> AppResult<Option<AnswerOption>>;
    async fn list_by_questions(&self, question_ids: Vec<QuestionId>) -> AppResult<Vec<AnswerOption>>;
    async fn create(&self, option: AnswerOption) -> AppResult<AnswerOption>;
    async fn create_many(&self, options: Vec<AnswerOption>) -> AppResult<Vec<AnswerOption>>;
    async fn delete(&self, id: AnswerOptionId) -> AppResult<()>;
}

pub struct MongoAnswerOptionRepository {
    collection: Collection<AnswerOption>,
}

impl MongoAnswerOptionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(&db.collection_names().answer_options);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for answer_options collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let question_index = IndexModel::builder()
            .keys(doc! { "question_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("question_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(question_index).await?;

        log::info!("Successfully created indexes for answer_options collection");
        Ok(())
    }
}

#[async_trait]
impl AnswerOptionRepository for MongoAnswerOptionRepository {
    async fn find_by_id(&self, id: AnswerOptionId) -> AppResult<Option<AnswerOption>> {
        let option = self
            .collection
            .find_one(doc! { "id": id.to_string() })
            .await?;
        Ok(option)
    }

    async fn list_by_questions(&self, question_ids: Vec<QuestionId>) -> AppResult<Vec<AnswerOption>> {
        let ids: Vec<String> = question_ids.iter().map(ToString::to_string).collect();
        let options = self
            .collection
            .find(doc! { "question_id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(options)
    }

    async fn create(&self, option: AnswerOption) -> AppResult<AnswerOption> {
        self.collection.insert_one(&option).await?;
        Ok(option)
    }

    async fn create_many(&self, options: Vec<AnswerOption>) -> AppResult<Vec<AnswerOption>> {
        if options.is_empty() {
            return Ok(options);
        }
        self.collection.insert_many(&options).await?;
        Ok(options)
    }

    async fn delete(&self, id: AnswerOptionId) -> AppResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Answer option with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
