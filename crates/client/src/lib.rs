//! blogstack_client - CLI client for the blogstack API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;
pub mod token;

pub use client::BlogstackClient;
pub use error::{ClientError, Result};
