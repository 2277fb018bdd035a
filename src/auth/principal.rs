use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    models::ids::PrincipalId,
};

/// Source of the acting principal for the current request.
///
/// Resolved on every call; nothing is cached between requests.
#[cfg_attr(test, mockall::automock)]
pub trait PrincipalContext: Send + Sync {
    fn current_principal(&self) -> AppResult<PrincipalId>;
}

/// The identity attached to an inbound request, if any.
///
/// Extracting it never fails. A missing or unusable identity only surfaces
/// when an operation asks for the principal, after input validation.
#[derive(Debug, Clone, Default)]
pub struct RequestPrincipal {
    claims: Option<Claims>,
}

impl RequestPrincipal {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_claims(claims: Claims) -> Self {
        Self {
            claims: Some(claims),
        }
    }
}

impl PrincipalContext for RequestPrincipal {
    fn current_principal(&self) -> AppResult<PrincipalId> {
        let claims = self.claims.as_ref().ok_or_else(|| {
            AppError::PrincipalUnavailable("No authenticated identity on request".to_string())
        })?;

        claims.sub.parse().map_err(|_| {
            AppError::PrincipalUnavailable("Subject claim is not a valid principal id".to_string())
        })
    }
}

/// A principal already established by the caller, e.g. an in-process job.
impl PrincipalContext for PrincipalId {
    fn current_principal(&self) -> AppResult<PrincipalId> {
        Ok(*self)
    }
}

impl FromRequest for RequestPrincipal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        ready(Ok(Self { claims }))
    }
}
