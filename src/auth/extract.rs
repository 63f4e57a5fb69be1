//! Caller Extraction
//!
//! Turns an `Authorization: Bearer <token>` header into a verified
//! [`Caller`]. Handlers that take a `Caller` argument are protected routes;
//! a missing or bad token is rejected before the handler body runs.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use super::errors::AuthError;
use super::jwt::JwtManager;
use super::user::UserProfile;

/// Authenticated identity of the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(UserProfile);

impl Caller {
    pub fn new(profile: UserProfile) -> Self {
        Self(profile)
    }

    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn profile(&self) -> &UserProfile {
        &self.0
    }
}

/// Router state that can verify bearer tokens
pub trait TokenVerifier {
    fn token_verifier(&self) -> &JwtManager;
}

impl<T: TokenVerifier> TokenVerifier for Arc<T> {
    fn token_verifier(&self) -> &JwtManager {
        (**self).token_verifier()
    }
}

/// Extract the bearer token from request headers
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: TokenVerifier + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::InvalidToken)?;
        state.token_verifier().verify_identity(token).map(Caller)
    }
}
