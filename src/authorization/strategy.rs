//! Per-kind ownership proofs.
//!
//! A strategy answers one question: does this principal own this resource,
//! directly or through its parents. Anything short of a positive match is a
//! denial, including a missing resource and a failed lookup.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    authorization::resource::ResourceKind,
    errors::AppResult,
    models::ids::{AnswerOptionId, PrincipalId, QuestionId, QuizId, ResourceId},
    repositories::OwnershipRepository,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnershipStrategy: Send + Sync {
    async fn is_owner(&self, resource_id: ResourceId, principal: PrincipalId) -> bool;
}

fn fail_closed(
    kind: ResourceKind,
    resource_id: ResourceId,
    principal: PrincipalId,
    lookup: AppResult<bool>,
) -> bool {
    match lookup {
        Ok(true) => true,
        Ok(false) => {
            log::debug!(
                "{} {} is absent or not owned by {}",
                kind,
                resource_id,
                principal
            );
            false
        }
        Err(err) => {
            log::error!(
                "Ownership lookup for {} {} failed, denying: {}",
                kind,
                resource_id,
                err
            );
            false
        }
    }
}

/// Quizzes carry their owner directly.
pub struct QuizOwnership {
    repository: Arc<dyn OwnershipRepository>,
}

impl QuizOwnership {
    pub fn new(repository: Arc<dyn OwnershipRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl OwnershipStrategy for QuizOwnership {
    async fn is_owner(&self, resource_id: ResourceId, principal: PrincipalId) -> bool {
        let lookup = self
            .repository
            .owns_quiz(principal, QuizId::from(resource_id))
            .await;
        fail_closed(ResourceKind::Quiz, resource_id, principal, lookup)
    }
}

/// Questions inherit the owner of their quiz.
pub struct QuestionOwnership {
    repository: Arc<dyn OwnershipRepository>,
}

impl QuestionOwnership {
    pub fn new(repository: Arc<dyn OwnershipRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl OwnershipStrategy for QuestionOwnership {
    async fn is_owner(&self, resource_id: ResourceId, principal: PrincipalId) -> bool {
        let lookup = self
            .repository
            .owns_question(principal, QuestionId::from(resource_id))
            .await;
        fail_closed(ResourceKind::Question, resource_id, principal, lookup)
    }
}

/// Answer options inherit the owner of the quiz holding their question.
pub struct AnswerOptionOwnership {
    repository: Arc<dyn OwnershipRepository>,
}

impl AnswerOptionOwnership {
    pub fn new(repository: Arc<dyn OwnershipRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl OwnershipStrategy for AnswerOptionOwnership {
    async fn is_owner(&self, resource_id: ResourceId, principal: PrincipalId) -> bool {
        let lookup = self
            .repository
            .owns_answer_option(principal, AnswerOptionId::from(resource_id))
            .await;
        fail_closed(ResourceKind::AnswerOption, resource_id, principal, lookup)
    }
}
