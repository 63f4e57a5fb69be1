//! # Auth Service
//!
//! Sign-up and sign-in on top of a [`UserRepository`] and a [`JwtManager`].

use std::sync::Arc;

use super::crypto::{verify_against_dummy, PasswordPolicy};
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtConfig, JwtManager};
use super::user::{Credentials, User, UserRepository};

/// Auth service combining the user store and token issuance
pub struct AuthService<U: UserRepository> {
    user_repo: Arc<U>,
    jwt_manager: JwtManager,
    password_policy: PasswordPolicy,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: Arc<U>, jwt_config: JwtConfig, password_policy: PasswordPolicy) -> Self {
        Self {
            user_repo,
            jwt_manager: JwtManager::new(jwt_config),
            password_policy,
        }
    }

    /// Register a new user and issue a token for them
    pub fn sign_up(&self, request: Credentials) -> AuthResult<(User, String)> {
        if self.user_repo.find_by_username(&request.username)?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let user = User::new(request.username, &request.password, &self.password_policy)?;
        self.user_repo.create(&user)?;

        let token = self.jwt_manager.generate_access_token(&user.profile())?;
        Ok((user, token))
    }

    /// Authenticate a user and issue a token
    pub fn sign_in(&self, request: Credentials) -> AuthResult<(User, String)> {
        let Some(user) = self.user_repo.find_by_username(&request.username)? else {
            verify_against_dummy(&request.password);
            return Err(AuthError::InvalidCredentials);
        };

        if !user.verify_password(&request.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_manager.generate_access_token(&user.profile())?;
        Ok((user, token))
    }

    pub fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    pub fn users(&self) -> &Arc<U> {
        &self.user_repo
    }
}
