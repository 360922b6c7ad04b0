//! Session tokens
//!
//! HS256 JWTs carrying the account id, role and a few display fields. The
//! token is returned in the login body and also set as an HttpOnly cookie
//! (`admin_auth_token` or `client_auth_token`).

use actix_web::cookie::{time, Cookie, SameSite};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eb_core::domain::entities::{AccountRole, ApprovalState};
use eb_core::domain::value_objects::AuthenticatedAccount;
use eb_shared::config::AuthConfig;

pub const ADMIN_COOKIE: &str = "admin_auth_token";
pub const CLIENT_COOKIE: &str = "client_auth_token";

/// Cookie carrying the session of `role`
pub fn cookie_name(role: AccountRole) -> &'static str {
    match role {
        AccountRole::Admin => ADMIN_COOKIE,
        AccountRole::Client => CLIENT_COOKIE,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session token is invalid or expired")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Session subject is not an account id")]
    MalformedSubject,

    #[error("Failed to sign session token: {0}")]
    Signing(String),
}

/// Claims of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id
    pub sub: String,
    pub role: AccountRole,
    pub email: String,
    pub name: String,
    /// Approval at login time; clients may log in before approval
    pub approved: bool,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn account_id(&self) -> Result<Uuid, SessionError> {
        Uuid::parse_str(&self.sub).map_err(|_| SessionError::MalformedSubject)
    }

    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    issuer: String,
    cookie_secure: bool,
}

impl SessionManager {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::seconds(config.session_ttl_seconds),
            issuer: config.issuer.clone(),
            cookie_secure: config.cookie_secure,
        }
    }

    /// Sign a session for `account`, valid from `now` for the configured TTL
    pub fn issue(
        &self,
        account: &AuthenticatedAccount,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, SessionError> {
        let expires_at = now + self.ttl;
        let claims = SessionClaims {
            sub: account.account_id.to_string(),
            role: account.role,
            email: account.email.clone(),
            name: account.display_name.clone(),
            approved: account.approval == ApprovalState::Approved,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SessionError::Signing(e.to_string()))?;

        Ok(IssuedSession { token, expires_at })
    }

    /// Check signature, issuer and expiry
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.validate_exp = true;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
        data.claims.account_id()?;
        Ok(data.claims)
    }

    /// HttpOnly cookie carrying `token`
    pub fn cookie(&self, role: AccountRole, token: String) -> Cookie<'static> {
        Cookie::build(cookie_name(role), token)
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(self.same_site())
            .max_age(time::Duration::seconds(self.ttl.num_seconds()))
            .finish()
    }

    /// Cookie that clears the session of `role`
    pub fn removal_cookie(&self, role: AccountRole) -> Cookie<'static> {
        let mut cookie = Cookie::build(cookie_name(role), "")
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(self.same_site())
            .finish();
        cookie.make_removal();
        cookie
    }

    // Cross-site front-ends need `None`, which browsers only accept with `Secure`.
    fn same_site(&self) -> SameSite {
        if self.cookie_secure {
            SameSite::None
        } else {
            SameSite::Lax
        }
    }
}
