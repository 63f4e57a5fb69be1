//! Auth HTTP Routes
//!
//! Sign-up and sign-in; both answer with a bearer token for the protected
//! `/hoots` routes.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use serde::Serialize;

use crate::auth::{AuthError, AuthService, Credentials, InMemoryUserRepository, User, UserProfile};
use crate::observability::{log_event_with_fields, Event};

/// Shared auth state
pub struct AuthState {
    pub service: AuthService<InMemoryUserRepository>,
}

impl AuthState {
    pub fn new(service: AuthService<InMemoryUserRepository>) -> Self {
        Self { service }
    }
}

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/sign-up", post(sign_up_handler))
        .route("/sign-in", post(sign_in_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

impl AuthResponse {
    fn new(user: &User, token: String) -> Self {
        Self {
            token,
            user: user.profile(),
        }
    }
}

/// Sign-up handler
async fn sign_up_handler(
    State(state): State<Arc<AuthState>>,
    Json(request): Json<Credentials>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let (user, token) = state.service.sign_up(request)?;
    log_event_with_fields(
        Event::UserSignedUp,
        &[("user_id", &user.id.to_string()), ("username", &user.username)],
    );
    Ok((StatusCode::CREATED, Json(AuthResponse::new(&user, token))))
}

/// Sign-in handler
async fn sign_in_handler(
    State(state): State<Arc<AuthState>>,
    Json(request): Json<Credentials>,
) -> Result<Json<AuthResponse>, AuthError> {
    let (user, token) = state.service.sign_in(request)?;
    log_event_with_fields(Event::UserSignedIn, &[("user_id", &user.id.to_string())]);
    Ok(Json(AuthResponse::new(&user, token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::crypto::PasswordPolicy;
    use crate::auth::JwtConfig;

    #[test]
    fn test_auth_response_carries_public_profile_only() {
        let user = User::new("owl".into(), "password123", &PasswordPolicy::default()).unwrap();
        let service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            JwtConfig::default(),
            PasswordPolicy::default(),
        );
        let _state = AuthState::new(service);

        let json = serde_json::to_value(AuthResponse::new(&user, "t".into())).unwrap();
        assert_eq!(json["token"], "t");
        assert_eq!(json["user"]["username"], "owl");
        assert!(json["user"].get("passwordHash").is_none());
    }
}
