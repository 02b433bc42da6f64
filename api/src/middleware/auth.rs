//! JWT authentication middleware for protected endpoints.
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! through the token service held in app data, and injects an
//! [`AuthContext`] into the request extensions for handlers to extract.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use tm_core::domain::entities::token::Claims;
use tm_core::errors::{DomainError, TokenError};
use tm_core::repositories::RevocationLedger;
use tm_core::services::token::TokenService;

use crate::handlers::error::{unauthorized_error, MISSING_CREDENTIALS_DETAIL};

/// Object-safe view of the token service, so the middleware does not need
/// to be generic over the ledger implementation.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Claims, DomainError>;
}

#[async_trait]
impl<L: RevocationLedger> TokenVerifier for TokenService<L> {
    async fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify_token(token).await
    }
}

/// Authenticated user context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User id parsed from the token subject
    pub user_id: u64,
    /// Token id, available for per-request revocation
    pub jti: String,
}

impl AuthContext {
    /// Build a context from verified claims.
    ///
    /// The subject is the user id in decimal; anything else is a token
    /// this service did not issue.
    pub fn from_claims(claims: &Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .sub
            .parse::<u64>()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
        Ok(Self {
            user_id,
            jti: claims.jti.clone(),
        })
    }
}

/// JWT authentication middleware factory
#[derive(Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
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

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(req.request()) {
                Some(token) => token,
                None => return Err(unauthorized_error(MISSING_CREDENTIALS_DETAIL)),
            };

            let verifier = req
                .app_data::<web::Data<Arc<dyn TokenVerifier>>>()
                .ok_or_else(|| unauthorized_error(MISSING_CREDENTIALS_DETAIL))?;

            let claims = verifier
                .verify(&token)
                .await
                .map_err(|e| unauthorized_error(&denial_detail(&e)))?;

            let auth_context = AuthContext::from_claims(&claims)
                .map_err(|e| unauthorized_error(&denial_detail(&e)))?;

            req.extensions_mut().insert(auth_context);
            service.call(req).await
        })
    }
}

/// Extracts the bearer token from the Authorization header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// User-facing detail for a verification denial.
///
/// The three token outcomes keep their distinct messages; anything else
/// collapses to the generic credential failure.
fn denial_detail(error: &DomainError) -> String {
    match error {
        DomainError::Token(TokenError::TokenExpired)
        | DomainError::Token(TokenError::InvalidToken)
        | DomainError::Token(TokenError::TokenRevoked) => error.to_string(),
        _ => MISSING_CREDENTIALS_DETAIL.to_string(),
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized_error(MISSING_CREDENTIALS_DETAIL));

        ready(result)
    }
}
