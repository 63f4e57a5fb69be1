//! # Auth Module
//!
//! User accounts, password hashing, JWT issuance and the bearer-token
//! extractor that produces the caller identity for protected routes.

pub mod crypto;
pub mod errors;
pub mod extract;
pub mod jwt;
pub mod service;
pub mod user;

pub use errors::{AuthError, AuthResult};
pub use extract::{Caller, TokenVerifier};
pub use jwt::{JwtClaims, JwtConfig, JwtManager};
pub use service::AuthService;
pub use user::{Credentials, InMemoryUserRepository, User, UserProfile, UserRepository};
