//! CLI command definitions.

pub mod auth;
pub mod blogs;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::client::DEFAULT_BASE_URL;

/// CLI client for the blogstack API.
#[derive(Debug, Parser)]
#[command(name = "blogstack-client")]
#[command(about = "CLI client for the blogstack API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "BLOGSTACK_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Token to authenticate with, instead of the stored one.
    #[arg(long, env = "BLOGSTACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// File the token is stored in after login.
    #[arg(long, env = "BLOGSTACK_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign up, sign in and inspect the current session.
    Auth(auth::AuthCommand),
    /// Browse and manage blogs.
    Blogs(blogs::BlogsCommand),
    /// Server readiness check.
    Health,
}
