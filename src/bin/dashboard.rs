//! Terminal dashboard for a WaniKani-style API.
//!
//! Talks to the real upstream or to the mock provider in this crate.
//!
//! # Usage
//!
//! ```bash
//! # Interactive dashboard (default command)
//! cargo run --bin dashboard
//!
//! # Against a local mock provider
//! cargo run --bin dashboard -- --api-base http://localhost:3000/v2/ show
//!
//! # Create an account and get a token from the mock provider
//! cargo run --bin dashboard -- --api-base http://localhost:3000/v2/ signup -u alice
//! cargo run --bin dashboard -- --api-base http://localhost:3000/v2/ login -u alice
//!
//! # Random subject to revise
//! cargo run --bin dashboard -- --api-base http://localhost:3000/v2/ revise
//! ```
//!
//! # Environment Variables
//!
//! - `WANIKANI_API_BASE`: API base URL (default: `https://api.wanikani.com/v2/`)
//! - `WANIKANI_API_TOKEN`: Token used instead of prompting
//! - `HTTP_TIMEOUT_SECS`: Per-request timeout (default: 30)
//! - `LOG_FORMAT`: Log format for stderr diagnostics, `text` or `json` (default: `text`)
//! - `RUST_LOG`: Log filter for stderr diagnostics (default: `warn`)

use srs_dashboard::config::{self, DashboardConfig};
use srs_dashboard::dashboard::render;
use srs_dashboard::dashboard::{ApiClient, DashboardSession, LoadFailure, ViewState};
use srs_dashboard::domain::clock::SystemClock;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password, Select};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Terminal dashboard for WaniKani-style SRS data.
#[derive(Parser)]
#[command(name = "dashboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API base URL (overrides WANIKANI_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Per-request timeout in seconds (overrides HTTP_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard (default)
    Show,

    /// Create an account on the provider
    Signup {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Log in and print a bearer token
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Fetch a random subject to revise
    Revise,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_tracing(&config.log_format);

    let client = ApiClient::new(config.api_base.clone(), config.http_timeout())
        .context("Failed to build HTTP client")?;

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => show(&client, config.api_token).await?,
        Commands::Signup { username } => signup(&client, username).await?,
        Commands::Login { username } => login(&client, username).await?,
        Commands::Revise => revise(&client, config.api_token).await?,
    }

    Ok(())
}

/// Environment first, then command-line overrides, then validation.
fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::from_env()?;

    if let Some(base) = &cli.api_base {
        config.api_base = config::parse_api_base(base)?;
    }
    if let Some(timeout) = cli.timeout {
        config.http_timeout_secs = timeout;
    }

    config.validate()?;
    Ok(config)
}

fn init_tracing(format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Interactive loop over the session state machine.
///
/// # Flow
///
/// 1. Prompt for a token (or use `WANIKANI_API_TOKEN` once)
/// 2. Load every collection sequentially
/// 3. Render the dashboard or the failure
/// 4. Offer refresh, new token, logout or quit
async fn show(client: &ApiClient, mut prefilled: Option<String>) -> Result<()> {
    println!("{}", "SRS Dashboard".bright_blue().bold());
    println!("  API: {}", client.base().as_str().cyan());
    println!();

    let mut session = DashboardSession::new(Arc::new(SystemClock));

    loop {
        match session.state() {
            ViewState::Unauthenticated => {
                let token = match prefilled.take() {
                    Some(token) => token,
                    None => prompt_token()?,
                };
                if token.trim().is_empty() {
                    println!("{}", "Bye.".bright_black());
                    return Ok(());
                }
                if let Err(e) = session.submit_token(&token) {
                    println!("{} {}", "✗".red(), e.to_string().red());
                }
            }
            ViewState::Loading => {
                print!("{}", render::render_state(session.state()));
                session.load(client).await?;
            }
            ViewState::Ready(_) | ViewState::Error(_) => {
                print!("{}", render::render_state(session.state()));
                println!();

                let unauthorized =
                    matches!(session.state(), ViewState::Error(LoadFailure::Unauthorized));
                let items: &[&str] = if unauthorized {
                    &["Enter a new token", "Log out", "Quit"]
                } else {
                    &["Refresh", "Log out", "Quit"]
                };

                let choice = Select::new()
                    .with_prompt("Next")
                    .items(items)
                    .default(0)
                    .interact()?;

                match items[choice] {
                    "Enter a new token" => {
                        let token = prompt_token()?;
                        if let Err(e) = session.submit_token(&token) {
                            println!("{} {}", "✗".red(), e.to_string().red());
                        }
                    }
                    "Refresh" => session.refresh()?,
                    "Log out" => {
                        session.logout();
                        println!("{}", "Logged out.".yellow());
                    }
                    _ => return Ok(()),
                }
            }
        }
    }
}

fn prompt_token() -> Result<String> {
    Ok(Password::new()
        .with_prompt("API token (empty to quit)")
        .allow_empty_password(true)
        .interact()?)
}

fn prompt_username(username: Option<String>) -> Result<String> {
    match username {
        Some(u) => Ok(u),
        None => Ok(Input::new().with_prompt("Username").interact_text()?),
    }
}

/// Registers an account on the provider.
async fn signup(client: &ApiClient, username: Option<String>) -> Result<()> {
    println!("{}", "Create account".bright_blue().bold());
    println!();

    let username = prompt_username(username)?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let message = client
        .signup(&username, &password)
        .await
        .context("Signup failed")?;

    println!();
    println!("{} {}", "✓".green(), message.green().bold());
    println!(
        "  Log in with: {} login -u {}",
        "dashboard".bright_cyan(),
        username.cyan()
    );

    Ok(())
}

/// Logs in and prints the bearer token once.
async fn login(client: &ApiClient, username: Option<String>) -> Result<()> {
    println!("{}", "Log in".bright_blue().bold());
    println!();

    let username = prompt_username(username)?;
    let password = Password::new().with_prompt("Password").interact()?;

    let token = client
        .login(&username, &password)
        .await
        .context("Login failed")?;

    println!();
    println!("{}", "✓ Logged in".green().bold());
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!("{}", "Use it with:".bright_white());
    println!(
        "  {}={} dashboard",
        "WANIKANI_API_TOKEN".bright_cyan(),
        token.bright_yellow()
    );

    Ok(())
}

/// Prints one random subject from the provider's revision session.
async fn revise(client: &ApiClient, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(t) => t,
        None => prompt_token()?,
    };

    let session = client
        .revision_session(token.trim())
        .await
        .context("Could not start a revision session")?;

    let subject = &session.subject;
    println!("{}", "Revision".bright_blue().bold());
    println!();
    println!("  User:    {}", session.user.cyan());
    println!(
        "  Subject: {}  {}",
        subject.data.characters.as_deref().unwrap_or("?").bold(),
        subject.primary_meaning().unwrap_or("?")
    );
    if let Some(level) = subject.data.level {
        println!("  Level:   {}", level.to_string().bright_black());
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dashboard",
            "login",
            "-u",
            "alice",
            "--api-base",
            "http://127.0.0.1:3000/v2/",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.api_base.as_deref(), Some("http://127.0.0.1:3000/v2/"));
        assert_eq!(cli.timeout, Some(5));
        assert!(matches!(
            cli.command,
            Some(Commands::Login { username: Some(ref u) }) if u == "alice"
        ));
    }
}
