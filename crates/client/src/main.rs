//! blogstack-client CLI entry point.

use blogstack_client::cli::auth::AuthAction;
use blogstack_client::cli::blogs::BlogsAction;
use blogstack_client::cli::{Cli, Commands};
use blogstack_client::client::BlogstackClient;
use blogstack_client::error::{ClientError, Result};
use blogstack_client::output::{pretty, render, render_message};
use blogstack_client::token::{decode_claims, is_expired, TokenStore};
use blogstack_core::auth::{LoginRequest, SignupRequest};
use clap::Parser;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let store = TokenStore::new(
        cli.token_file
            .clone()
            .unwrap_or_else(TokenStore::default_path),
    );
    let token = match cli.token.clone() {
        Some(token) => Some(token),
        None => store.load()?,
    };
    let client = BlogstackClient::new(&cli.base_url)?.with_token(token.clone());

    match cli.command {
        Commands::Auth(auth_cmd) => match auth_cmd.action {
            AuthAction::Signup {
                name,
                email,
                password,
            } => {
                let response = client
                    .signup(&SignupRequest {
                        name,
                        email,
                        password,
                    })
                    .await?;
                store.save(&response.token)?;
                if !cli.quiet {
                    println!("{}", signed_in_message(&response.token, cli.format)?);
                }
            }
            AuthAction::Login { email, password } => {
                let response = client.login(&LoginRequest { email, password }).await?;
                store.save(&response.token)?;
                if !cli.quiet {
                    println!("{}", signed_in_message(&response.token, cli.format)?);
                }
            }
            AuthAction::Logout => {
                let removed = store.clear()?;
                if !cli.quiet {
                    let message = if removed { "Signed out" } else { "Not signed in" };
                    println!("{}", render_message(message, cli.format));
                }
            }
            AuthAction::Whoami => {
                let token = token.ok_or(ClientError::NotAuthenticated)?;
                let claims = decode_claims(&token)?;
                let expired = is_expired(&claims, chrono::Utc::now());
                println!(
                    "{}",
                    render(&claims, cli.format, |c| pretty::format_claims(c, expired))
                );
            }
            AuthAction::User => {
                let user = client.current_user().await?;
                println!("{}", render(&user, cli.format, pretty::format_user));
            }
        },
        Commands::Blogs(blogs_cmd) => match blogs_cmd.action {
            BlogsAction::List { page, limit } => {
                let page = client.list_blogs(page, limit).await?;
                println!("{}", render(&page, cli.format, pretty::format_blog_page));
            }
            BlogsAction::Get { id } => {
                let blog = client.get_blog(&id).await?;
                println!("{}", render(&blog, cli.format, pretty::format_blog));
            }
            BlogsAction::Create(fields) => {
                let blog = client.create_blog(fields.into()).await?;
                println!(
                    "{}",
                    render(&blog, cli.format, |b| format!(
                        "Created:\n{}",
                        pretty::format_blog(b)
                    ))
                );
            }
            BlogsAction::Update { id, fields } => {
                let blog = client.update_blog(&id, fields.into()).await?;
                println!(
                    "{}",
                    render(&blog, cli.format, |b| format!(
                        "Updated:\n{}",
                        pretty::format_blog(b)
                    ))
                );
            }
            BlogsAction::Delete { id } => {
                let response = client.delete_blog(&id).await?;
                if !cli.quiet {
                    println!("{}", render_message(&response.message, cli.format));
                }
            }
        },
        Commands::Health => {
            let readiness = client.readiness().await?;
            println!(
                "{}",
                render(&readiness, cli.format, pretty::format_readiness)
            );
            if !readiness.healthy {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn signed_in_message(token: &str, format: blogstack_client::cli::OutputFormat) -> Result<String> {
    let claims = decode_claims(token)?;
    Ok(render(&claims, format, |c| {
        format!("Signed in as {}", c.user.name)
    }))
}
