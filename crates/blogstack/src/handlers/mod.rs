pub mod blogs;
pub mod error;
pub mod health;
mod submission;

pub use error::AppError;
