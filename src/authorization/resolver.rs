use std::{collections::HashMap, sync::Arc};

use crate::{
    authorization::{
        resource::{ResourceKind, ResourceTarget},
        strategy::{AnswerOptionOwnership, OwnershipStrategy, QuestionOwnership, QuizOwnership},
    },
    errors::{AppError, AppResult},
    models::ids::{PrincipalId, ResourceId},
    repositories::OwnershipRepository,
};

/// Startup-time collection of strategies, one per [`ResourceKind`].
#[derive(Default)]
pub struct StrategyRegistry {
    strategies: HashMap<ResourceKind, Arc<dyn OwnershipStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        mut self,
        kind: ResourceKind,
        strategy: Arc<dyn OwnershipStrategy>,
    ) -> AppResult<Self> {
        if self.strategies.contains_key(&kind) {
            return Err(AppError::ConfigurationError(format!(
                "an ownership strategy for {} is already registered",
                kind
            )));
        }
        self.strategies.insert(kind, strategy);
        Ok(self)
    }

    /// Freezes the registry. Every kind must have a strategy by now.
    pub fn build(mut self) -> AppResult<AuthorizationResolver> {
        let mut table = Vec::with_capacity(ResourceKind::COUNT);
        let mut missing = Vec::new();

        for kind in ResourceKind::ALL {
            match self.strategies.remove(&kind) {
                Some(strategy) => table.push(strategy),
                None => missing.push(kind.as_str()),
            }
        }

        if !missing.is_empty() {
            return Err(AppError::ConfigurationError(format!(
                "no ownership strategy registered for: {}",
                missing.join(", ")
            )));
        }

        let strategies = table.try_into().map_err(|_| {
            AppError::ConfigurationError("ownership strategy table is incomplete".to_string())
        })?;

        Ok(AuthorizationResolver { strategies })
    }
}

/// Answers "may this principal modify that resource".
///
/// Holds a fixed strategy table and no per-request state, so one instance is
/// shared by every request.
pub struct AuthorizationResolver {
    strategies: [Arc<dyn OwnershipStrategy>; ResourceKind::COUNT],
}

impl AuthorizationResolver {
    /// Registers the quiz, question and answer option strategies over one store.
    pub fn from_repository(repository: Arc<dyn OwnershipRepository>) -> AppResult<Self> {
        StrategyRegistry::new()
            .register(
                ResourceKind::Quiz,
                Arc::new(QuizOwnership::new(repository.clone())),
            )?
            .register(
                ResourceKind::Question,
                Arc::new(QuestionOwnership::new(repository.clone())),
            )?
            .register(
                ResourceKind::AnswerOption,
                Arc::new(AnswerOptionOwnership::new(repository)),
            )?
            .build()
    }

    pub async fn is_authorized(
        &self,
        kind: ResourceKind,
        resource_id: ResourceId,
        principal: PrincipalId,
    ) -> bool {
        let granted = self.strategies[kind.index()]
            .is_owner(resource_id, principal)
            .await;

        log::debug!(
            "Authorization for {} on {} {}: {}",
            principal,
            kind,
            resource_id,
            if granted { "granted" } else { "denied" }
        );

        granted
    }

    pub async fn authorize(&self, target: ResourceTarget, principal: PrincipalId) -> bool {
        self.is_authorized(target.kind(), target.id(), principal).await
    }
}
