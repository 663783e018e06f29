//! Password and token authentication for blogstack.
//!
//! This crate provides:
//! - bcrypt password hashing and HS256 JWT issue/verify
//! - The `/signup`, `/login` and `/user` routes
//! - Axum extractors for authenticated requests

mod config;
mod error;
mod extractors;
mod handlers;
mod password;
mod state;
mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{CurrentUser, TOKEN_HEADER};
pub use handlers::auth_routes;
pub use password::{hash_password, verify_password};
pub use state::AuthState;
pub use token::{issue_token, verify_token};
