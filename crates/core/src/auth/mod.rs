mod error;
mod functions;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{calculate_expiry, normalize_email};
pub use types::{
    Claims, LoginRequest, PublicUser, SignupRequest, TokenResponse, TokenUser, User,
};
pub use validation::{is_valid_email, validate_login, validate_signup, MIN_PASSWORD_LENGTH};
