//! Authentication CLI commands.

use clap::{Parser, Subcommand};

/// Authentication commands.
#[derive(Debug, Parser)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Available auth actions.
#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Create an account and store its token.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// At least 6 characters.
        #[arg(long, env = "BLOGSTACK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in and store the token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BLOGSTACK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Show who the stored token belongs to, without contacting the server.
    Whoami,
    /// Fetch the signed-in user from the server.
    User,
}
