//! Bearer-token middleware for protected routes.
//!
//! Delegates to `SessionService::authorize`, which validates the access token
//! and checks the revocation ledger, then injects the caller's identity into
//! request extensions.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use sl_core::domain::entities::{AccessClaims, UserRole};
use sl_core::errors::{AuthError, DomainError};

use crate::app::AppState;
use crate::handlers::ApiError;

/// Caller identity injected into authorized requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
    pub user_role: UserRole,
    pub is_email_verified: bool,
}

impl From<AccessClaims> for AuthContext {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            user_role: claims.user_role,
            is_email_verified: claims.is_email_verified,
        }
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
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let header = authorization_header(&req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                ApiError::Domain(DomainError::internal("application state is not configured"))
            })?;

            let claims = state
                .sessions
                .authorize(header.as_deref())
                .await
                .map_err(ApiError::from)?;

            req.extensions_mut().insert(AuthContext::from(claims));
            service.call(req).await
        })
    }
}

/// Raw `Authorization` header value, if it is valid text
fn authorization_header(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .map(str::to_owned)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Error> = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Domain(AuthError::Unauthenticated.into()).into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_is_passed_through() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(
            authorization_header(&req),
            Some("Bearer test_token_123".to_string())
        );

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(authorization_header(&req_no_header), None);
    }

    #[test]
    fn test_context_from_claims() {
        let claims = AccessClaims {
            sub: "u-1".to_string(),
            email: "ada@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            user_role: UserRole::User,
            is_email_verified: true,
            iat: 1,
            exp: 2,
        };

        let context = AuthContext::from(claims);
        assert_eq!(context.user_id, "u-1");
        assert!(context.is_email_verified);
    }
}
