//! Core domain for blogstack.
//!
//! Pure types, validation and policy shared by the server and the client.
//! Nothing in this crate performs I/O; the traits in [`storage`] and
//! [`upload`] are implemented by the `blogstack` binary.

pub mod auth;
pub mod blog;
pub mod serde;
pub mod storage;
pub mod upload;
pub mod validation;
