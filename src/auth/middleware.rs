use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;

use crate::{
    auth::JwtService,
    errors::{AppError, AppResult},
};

/// Attaches verified [`Claims`](crate::auth::Claims) to the request.
///
/// Requests without an `Authorization` header pass through anonymously so
/// public reads keep working; a header that is present but not a valid
/// bearer token is answered with 401 right here.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

fn bearer_token(req: &ServiceRequest) -> AppResult<Option<String>> {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return Ok(None);
    };

    header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| Some(token.trim().to_string()))
        .ok_or_else(|| {
            AppError::PrincipalUnavailable("Invalid authorization header format".to_string())
        })
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    log::debug!("Rejecting request credentials: {}", err);
    req.into_response(err.error_response()).map_into_right_body()
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match bearer_token(&req) {
                Ok(token) => token,
                Err(err) => return Ok(reject(req, err)),
            };

            if let Some(token) = token {
                let Some(jwt_service) = req.app_data::<web::Data<JwtService>>().cloned() else {
                    log::error!("JWT service not configured");
                    return Ok(reject(
                        req,
                        AppError::InternalError("JWT service not configured".to_string()),
                    ));
                };

                match jwt_service.validate_token(&token) {
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                    }
                    Err(err) => return Ok(reject(req, err)),
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
