//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer credential from the Authorization
//! header, verifies it with the [`TokenService`] registered as app data and
//! injects the caller's claims into the request extensions. Rejections are
//! answered with the JSON error body instead of being returned as errors.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use tk_core::{
    domain::entities::claims::Claims,
    errors::{AuthError, DomainError},
    services::token::TokenService,
};

use crate::handlers::ApiError;

/// Authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Verified claims of the caller
    pub claims: Claims,
}

impl AuthContext {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let claims = match authenticate(&req) {
                Ok(claims) => claims,
                Err(err) => {
                    let response = err.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };
            debug!(user_id = %claims.id, "Request authenticated");

            req.extensions_mut().insert(AuthContext::new(claims));

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, ApiError> {
    let token = extract_bearer_token(req.headers())?;

    let token_service = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
        error!("TokenService is not registered as app data");
        ApiError(DomainError::Internal {
            message: "Token verification is not configured".to_string(),
        })
    })?;

    Ok(token_service.verify(token)?)
}

/// Extracts the credential from `Authorization: Bearer <credential>`
///
/// The scheme is case-sensitive and must be followed by at least one
/// whitespace character; everything after that whitespace is the credential.
///
/// # Returns
///
/// * `Ok(&str)` - The credential, possibly empty
/// * `Err(AuthError::MissingAuthorization)` - No header, or an empty one
/// * `Err(AuthError::InvalidAuthorizationFormat)` - Any other scheme or shape
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorization)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if value.is_empty() {
        return Err(AuthError::MissingAuthorization);
    }

    let rest = value
        .strip_prefix("Bearer")
        .ok_or(AuthError::InvalidAuthorizationFormat)?;

    if !rest.starts_with(char::is_whitespace) {
        return Err(AuthError::InvalidAuthorizationFormat);
    }

    Ok(rest.trim_start())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Self::Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthError::MissingAuthorization).into());

        ready(result)
    }
}
