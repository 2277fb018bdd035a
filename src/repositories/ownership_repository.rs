//! Read-only queries over the containment chain
//! quiz → question → answer option.
//!
//! Each query starts from the quizzes owned by the principal and left-joins
//! downwards, filtered to the target id. A row survives only when the whole
//! chain lines up, so a missing child and a foreign parent look the same.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Collection,
};

use crate::{
    config::CollectionNames,
    db::Database,
    errors::AppResult,
    models::ids::{AnswerOptionId, PrincipalId, QuestionId, QuizId},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnershipRepository: Send + Sync {
    async fn owns_quiz(&self, principal: PrincipalId, quiz_id: QuizId) -> AppResult<bool>;
    async fn owns_question(&self, principal: PrincipalId, question_id: QuestionId)
        -> AppResult<bool>;
    async fn owns_answer_option(
        &self,
        principal: PrincipalId,
        answer_option_id: AnswerOptionId,
    ) -> AppResult<bool>;
}

pub struct MongoOwnershipRepository {
    quizzes: Collection<Document>,
    names: CollectionNames,
}

impl MongoOwnershipRepository {
    pub fn new(db: &Database) -> Self {
        let names = db.collection_names().clone();
        Self {
            quizzes: db.get_collection(&names.quizzes),
            names,
        }
    }

    async fn any_match(&self, pipeline: Vec<Document>) -> AppResult<bool> {
        let mut cursor = self.quizzes.aggregate(pipeline).await?;
        Ok(cursor.try_next().await?.is_some())
    }
}

fn question_pipeline(
    names: &CollectionNames,
    principal: PrincipalId,
    question_id: QuestionId,
) -> Vec<Document> {
    vec![
        doc! { "$match": { "owner_id": principal.to_string() } },
        doc! {
            "$lookup": {
                "from": names.questions.as_str(),
                "let": { "quiz_id": "$id" },
                "pipeline": [
                    { "$match": { "$expr": { "$and": [
                        { "$eq": ["$quiz_id", "$$quiz_id"] },
                        { "$eq": ["$id", question_id.to_string()] },
                    ] } } },
                    { "$limit": 1 },
                ],
                "as": "questions",
            }
        },
        doc! { "$unwind": "$questions" },
        doc! { "$limit": 1 },
        doc! { "$project": { "_id": 0, "id": 1 } },
    ]
}

fn answer_option_pipeline(
    names: &CollectionNames,
    principal: PrincipalId,
    answer_option_id: AnswerOptionId,
) -> Vec<Document> {
    vec![
        doc! { "$match": { "owner_id": principal.to_string() } },
        doc! {
            "$lookup": {
                "from": names.questions.as_str(),
                "let": { "quiz_id": "$id" },
                "pipeline": [
                    { "$match": { "$expr": { "$eq": ["$quiz_id", "$$quiz_id"] } } },
                    { "$lookup": {
                        "from": names.answer_options.as_str(),
                        "let": { "question_id": "$id" },
                        "pipeline": [
                            { "$match": { "$expr": { "$and": [
                                { "$eq": ["$question_id", "$$question_id"] },
                                { "$eq": ["$id", answer_option_id.to_string()] },
                            ] } } },
                            { "$limit": 1 },
                        ],
                        "as": "answer_options",
                    } },
                    { "$unwind": "$answer_options" },
                    { "$limit": 1 },
                ],
                "as": "questions",
            }
        },
        doc! { "$unwind": "$questions" },
        doc! { "$limit": 1 },
        doc! { "$project": { "_id": 0, "id": 1 } },
    ]
}

#[async_trait]
impl OwnershipRepository for MongoOwnershipRepository {
    async fn owns_quiz(&self, principal: PrincipalId, quiz_id: QuizId) -> AppResult<bool> {
        let count = self
            .quizzes
            .count_documents(doc! {
                "id": quiz_id.to_string(),
                "owner_id": principal.to_string(),
            })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    async fn owns_question(
        &self,
        principal: PrincipalId,
        question_id: QuestionId,
    ) -> AppResult<bool> {
        self.any_match(question_pipeline(&self.names, principal, question_id))
            .await
    }

    async fn owns_answer_option(
        &self,
        principal: PrincipalId,
        answer_option_id: AnswerOptionId,
    ) -> AppResult<bool> {
        self.any_match(answer_option_pipeline(
            &self.names,
            principal,
            answer_option_id,
        ))
        .await
    }
}
