//! Uniform request pipeline.
//!
//! Every command and query runs the same stages in the same order:
//!
//! 1. validate the request shape
//! 2. authorize the caller against the target resource (mutations)
//! 3. locate the resource the operation works on
//! 4. execute the domain action
//!
//! The first failing stage ends the request, so invalid input never reaches
//! an ownership check and a denied caller never reaches domain logic.

use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::{
    auth::PrincipalContext,
    authorization::{AuthorizationResolver, ResourceTarget},
    errors::{AppError, AppResult},
    models::ids::PrincipalId,
};

/// Who may run an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Public read, no principal needed.
    Anonymous,
    /// Any authenticated principal.
    Authenticated,
    /// Only the principal owning the target, directly or through its parents.
    Owner(ResourceTarget),
}

/// One command or query. The handler supplies the validation rules (through
/// [`Validate`]), the resource to authorize against, and the domain action.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    type Request: Validate + Send + Sync;
    type Resource: Send;
    type Response: Send;

    /// Operation name used in logs and not-found messages.
    const NAME: &'static str;

    fn access(&self, request: &Self::Request) -> Access;

    /// Loads what `execute` works on. `None` means the resource does not exist.
    async fn locate(&self, request: &Self::Request) -> AppResult<Option<Self::Resource>>;

    async fn execute(
        &self,
        caller: Option<PrincipalId>,
        request: Self::Request,
        resource: Self::Resource,
    ) -> AppResult<Self::Response>;
}

pub struct RequestPipeline {
    resolver: Arc<AuthorizationResolver>,
}

impl RequestPipeline {
    pub fn new(resolver: Arc<AuthorizationResolver>) -> Self {
        Self { resolver }
    }

    pub async fn run<H: RequestHandler>(
        &self,
        handler: &H,
        request: H::Request,
        principal: &dyn PrincipalContext,
    ) -> AppResult<H::Response> {
        self.run_until_cancelled(handler, request, principal, &CancellationToken::new())
            .await
    }

    /// Like [`run`](Self::run), aborting as soon as `cancel` fires.
    ///
    /// Cancellation is honoured up to the start of `execute`. Once the
    /// domain action has started it runs to completion, so a mutation is
    /// attempted at most once and never left half-applied by this layer.
    pub async fn run_until_cancelled<H: RequestHandler>(
        &self,
        handler: &H,
        request: H::Request,
        principal: &dyn PrincipalContext,
        cancel: &CancellationToken,
    ) -> AppResult<H::Response> {
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        if let Err(errors) = request.validate() {
            log::debug!("{}: validation failed: {}", H::NAME, errors);
            return Err(errors.into());
        }

        let access = handler.access(&request);
        let caller = match access {
            Access::Anonymous => None,
            Access::Authenticated => Some(principal.current_principal()?),
            Access::Owner(target) => {
                let caller = principal.current_principal()?;
                let granted = until_cancelled(cancel, self.resolver.authorize(target, caller)).await?;

                if !granted {
                    log::warn!("{}: {} denied on {}", H::NAME, caller, target);
                    return Err(AppError::Unauthorized(format!(
                        "not allowed to modify {}",
                        target.kind()
                    )));
                }
                Some(caller)
            }
        };

        let resource = match until_cancelled(cancel, handler.locate(&request)).await?? {
            Some(resource) => resource,
            // Ownership was already proven, so the resource vanished in
            // between. Report it the same way as any other denial.
            None if matches!(access, Access::Owner(_)) => return Err(vanished(H::NAME)),
            None => {
                return Err(AppError::NotFound(format!("{}: resource not found", H::NAME)));
            }
        };

        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        log::debug!("{}: executing", H::NAME);
        match handler.execute(caller, request, resource).await {
            Err(AppError::NotFound(detail)) if matches!(access, Access::Owner(_)) => {
                log::debug!("{}: {}", H::NAME, detail);
                Err(vanished(H::NAME))
            }
            result => result,
        }
    }
}

/// Owned targets that go missing after authorization look like any other denial.
fn vanished(operation: &str) -> AppError {
    log::warn!("{}: target disappeared after authorization", operation);
    AppError::Unauthorized("not allowed to modify this resource".to_string())
}

async fn until_cancelled<F: Future>(cancel: &CancellationToken, future: F) -> AppResult<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        output = future => Ok(output),
    }
}
