//! Session middleware for protected endpoints.
//!
//! The token is read from the `Authorization: Bearer` header first and
//! from the session cookie second. Verified claims are put into the
//! request extensions, where handlers pick them up through the
//! [`SessionClaims`] extractor.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use eb_core::domain::entities::AccountRole;

use crate::handlers::ApiError;
use crate::session::{cookie_name, SessionClaims, SessionManager};

/// Session middleware factory
///
/// Sessions of another role are rejected with 403.
pub struct SessionAuth {
    sessions: Arc<SessionManager>,
    required_role: AccountRole,
}

impl SessionAuth {
    pub fn new(sessions: Arc<SessionManager>, required_role: AccountRole) -> Self {
        Self {
            sessions,
            required_role,
        }
    }

    pub fn admin(sessions: Arc<SessionManager>) -> Self {
        Self::new(sessions, AccountRole::Admin)
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            sessions: Arc::clone(&self.sessions),
            required_role: self.required_role,
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    sessions: Arc<SessionManager>,
    required_role: AccountRole,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
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
        let sessions = Arc::clone(&self.sessions);
        let required_role = self.required_role;

        Box::pin(async move {
            let Some(token) = extract_session_token(&req, required_role) else {
                return Err(ApiError::unauthorized("Authentication required").into());
            };

            let claims = match sessions.verify(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!(error = %e, path = req.path(), "Session rejected");
                    return Err(ApiError::from(e).into());
                }
            };

            if claims.role != required_role {
                tracing::warn!(
                    account_id = %claims.sub,
                    role = %claims.role,
                    path = req.path(),
                    "Session lacks required role"
                );
                return Err(ApiError::forbidden("Insufficient permissions").into());
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Bearer token, else the session cookie of `role`
fn extract_session_token(req: &ServiceRequest, role: AccountRole) -> Option<String> {
    extract_bearer_token(req).or_else(|| {
        req.cookie(cookie_name(role))
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Extractor for handlers behind [`SessionAuth`]
impl FromRequest for SessionClaims {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<SessionClaims>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required").into());

        ready(result)
    }
}
