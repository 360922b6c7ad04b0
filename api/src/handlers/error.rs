//! HTTP error type
//!
//! Every failing handler returns an [`ApiError`], which renders as the
//! shared [`ErrorResponse`] body. Domain errors are mapped here and nowhere
//! else.

use std::fmt;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use tracing::error;
use validator::ValidationErrors;

use eb_core::errors::{AuthError, DomainError, LifecycleError};
use eb_shared::{error_codes, ErrorResponse, IntoErrorResponse};

use crate::session::SessionError;

const CODE_INVALID_MESSAGE: &str = "Invalid or unknown verification code";

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, message),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error_codes::FORBIDDEN, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, message)
    }

    /// Field-level messages from `validator`, one detail per field
    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        let mut api_error = Self::validation("Request validation failed");
        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            api_error.body = api_error.body.add_detail(field, messages);
        }
        api_error
    }

    /// Mapping for endpoints that take an email and a code
    ///
    /// An unknown email answers exactly like a wrong code, so these
    /// endpoints cannot be used to probe for registered addresses.
    pub fn code_flow(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::VERIFICATION_CODE_INVALID,
                CODE_INVALID_MESSAGE,
            ),
            other => Self::from(other),
        }
    }

    pub fn code(&self) -> &str {
        &self.body.error
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

impl IntoErrorResponse for ApiError {
    fn to_error_response(&self) -> ErrorResponse {
        self.body.clone()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::validation(message),
            DomainError::NotFound { resource } => Self::not_found(format!("{resource} not found")),
            DomainError::ConcurrentModification => Self::new(
                StatusCode::CONFLICT,
                error_codes::CONFLICT,
                "The record was changed by another request, please retry",
            ),
            DomainError::DuplicateField { field } => {
                let mut api_error = Self::new(
                    StatusCode::CONFLICT,
                    error_codes::DUPLICATE_FIELD,
                    format!("{} already exists", field.replace('_', " ")),
                );
                api_error.body = api_error.body.add_detail("field", field);
                api_error
            }
            DomainError::Internal { message } => {
                error!(error = %message, "Internal error");
                internal_error()
            }
            DomainError::Lifecycle(err) => err.into(),
            DomainError::Auth(err) => err.into(),
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NoPendingCode | LifecycleError::CodeMismatch => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::VERIFICATION_CODE_INVALID,
                CODE_INVALID_MESSAGE,
            ),
            LifecycleError::CodeExpired => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::VERIFICATION_CODE_EXPIRED,
                "Verification code has expired, request a new one",
            ),
            LifecycleError::AlreadyVerified => Self::new(
                StatusCode::CONFLICT,
                error_codes::ALREADY_VERIFIED,
                "Email is already verified",
            ),
            LifecycleError::AlreadyApproved => Self::new(
                StatusCode::CONFLICT,
                error_codes::ALREADY_APPROVED,
                "Account is already approved",
            ),
            LifecycleError::RandomnessUnavailable => {
                error!(error = %err, "Code generation unavailable");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    error_codes::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable, please retry later",
                )
            }
            LifecycleError::InvalidHashFormat | LifecycleError::HashingFailed { .. } => {
                error!(error = %err, "Hashing failure");
                internal_error()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                "Wrong username or password",
            ),
            AuthError::AccountNotVerified => Self::new(
                StatusCode::FORBIDDEN,
                error_codes::ACCOUNT_NOT_VERIFIED,
                "Email address has not been verified",
            ),
            AuthError::Unauthorized => Self::unauthorized("Authentication required"),
            AuthError::Forbidden => Self::forbidden("Insufficient permissions"),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Signing(message) => {
                error!(error = %message, "Session signing failed");
                internal_error()
            }
            _ => Self::unauthorized("Invalid or expired session"),
        }
    }
}

fn internal_error() -> ApiError {
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    )
}

/// Extractor configs that report malformed input as `VALIDATION_ERROR`
pub fn extractor_configs(
    json_limit: usize,
) -> (web::JsonConfig, web::QueryConfig, web::PathConfig) {
    let json = web::JsonConfig::default()
        .limit(json_limit)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            ApiError::validation(format!("Invalid JSON body: {err}")).into()
        });
    let query =
        web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
            ApiError::validation(format!("Invalid query string: {err}")).into()
        });
    let path = web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        ApiError::validation(format!("Invalid path parameter: {err}")).into()
    });
    (json, query, path)
}
