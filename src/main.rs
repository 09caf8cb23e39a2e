// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Courtside command-line client.
//!
//! Every invocation bootstraps the session the way a page load does:
//! stored tokens are read, introspected when needed, and the navigation
//! state is rendered to the terminal.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use courtside::{
    config::Config,
    models::session::{PasswordChange, ProfileUpdate},
    models::QuarterLine,
    nav::{NavElement, NavView},
    routes::create_router,
    services::{SessionService, TokenPresence},
    shot::{self, FreeThrows, ShotEntry, ShotType},
    storage::{FileTokenStore, TokenStore},
    time_utils::format_utc_rfc3339,
    AppState,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser)]
#[command(name = "courtside", version, about = "Basketball stats client")]
struct Cli {
    /// Stats backend base URL
    #[arg(long, global = true, env = "COURTSIDE_API_URL")]
    api_url: Option<Url>,

    /// Session token file
    #[arg(long, global = true, env = "COURTSIDE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with username and password
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "COURTSIDE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Show which navigation menus are available
    Nav,
    /// Report whether external sign-in is enabled
    OauthStatus,
    /// Wait for an OAuth redirect on the loopback callback server
    Oauth,
    /// Absorb tokens from a redirect URL
    Absorb { url: Url },
    /// Update profile fields
    Profile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Change the account password
    ChangePassword {
        #[arg(long, env = "COURTSIDE_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "COURTSIDE_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
    /// Shot-string tools
    #[command(subcommand)]
    Shot(ShotCommand),
}

#[derive(Subcommand)]
enum ShotCommand {
    /// Decode shot-strings
    Decode { tokens: Vec<String> },
    /// Encode a shot entry in canonical form
    Encode(EncodeArgs),
    /// Totals for a scorebook line
    Totals { line: String },
}

#[derive(Args)]
struct EncodeArgs {
    #[arg(long)]
    made: u32,
    /// Point value (2 or 3)
    #[arg(long = "type", value_parser = clap::value_parser!(u8).range(2..=3))]
    shot_type: u8,
    /// Total attempts; defaults to `made`
    #[arg(long)]
    attempted: Option<u32>,
    #[arg(long, default_value_t = 0)]
    ft_made: u32,
    #[arg(long, default_value_t = 0)]
    ft_attempted: u32,
}

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "courtside=debug,info";

/// Renders navigation visibility as terminal lines.
struct TerminalNav;

impl NavView for TerminalNav {
    fn set_visible(&mut self, element: NavElement, visible: bool) {
        let mark = if visible { "x" } else { " " };
        println!("[{}] {}", mark, element.label());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }

    match cli.command {
        // Shot tools are offline
        Command::Shot(cmd) => run_shot(cmd)?,
        Command::Login { username, password } => {
            let (session, _) = open_session(&config)?;
            session.login(&username, &password).await?;
            session.refresh_auth_ui(&mut TerminalNav).await;
        }
        Command::Logout => {
            let (session, _) = open_session(&config)?;
            session.logout(&mut TerminalNav)?;
        }
        Command::Whoami => {
            let (session, _) = open_session(&config)?;
            let identity = session.current_identity().await?;
            println!("username:   {}", identity.username);
            println!("name:       {}", identity.display_name());
            if let Some(role) = identity.role {
                println!("role:       {:?}", role);
            }
            if let Some(email) = &identity.email {
                println!("email:      {}", email);
            }
            if let Some(provider) = &identity.provider {
                println!("provider:   {}", provider);
            }
            if let Some(created) = identity.created_at() {
                println!("created:    {}", format_utc_rfc3339(created));
            }
            if let Some(last) = identity.last_login() {
                println!("last login: {}", format_utc_rfc3339(last));
            }
        }
        Command::Nav => {
            let (session, _) = open_session(&config)?;
            let state = session.refresh_auth_ui(&mut TerminalNav).await;
            tracing::info!(state = ?state, "Navigation state");
        }
        Command::OauthStatus => {
            let (session, _) = open_session(&config)?;
            let enabled = session.oauth_enabled().await;
            println!("oauth_enabled: {}", enabled);
        }
        Command::Oauth => {
            let (session, store) = open_session(&config)?;
            run_callback_server(config, store).await?;
            session.refresh_auth_ui(&mut TerminalNav).await;
        }
        Command::Absorb { url } => {
            let (session, _) = open_session(&config)?;
            match session.absorb_redirect_tokens(&url)? {
                TokenPresence::Absorbed { url } => {
                    println!("{}", url);
                    session.refresh_auth_ui(&mut TerminalNav).await;
                }
                TokenPresence::NotPresent => {
                    println!("{}", url);
                    anyhow::bail!("URL does not carry a complete token set");
                }
            }
        }
        Command::Profile { email, full_name } => {
            let (session, _) = open_session(&config)?;
            session
                .update_profile(ProfileUpdate { email, full_name })
                .await?;
            println!("Profile updated");
        }
        Command::ChangePassword { current, new } => {
            let (session, _) = open_session(&config)?;
            session
                .change_password(PasswordChange {
                    current_password: current,
                    new_password: new,
                })
                .await?;
            println!("Password changed");
        }
    }

    Ok(())
}

/// Open the session file and build the API client around it.
fn open_session(config: &Config) -> anyhow::Result<(SessionService, Arc<dyn TokenStore>)> {
    let store: Arc<dyn TokenStore> = Arc::new(
        FileTokenStore::open(&config.session_file).context("Failed to open session file")?,
    );
    let session = SessionService::from_config(config, store.clone())?;
    tracing::debug!(api = %config.api_base_url, "Session bootstrap");
    Ok((session, store))
}

fn run_shot(cmd: ShotCommand) -> anyhow::Result<()> {
    match cmd {
        ShotCommand::Decode { tokens } => {
            for token in tokens {
                let entry = shot::decode(&token)?;
                println!("{}", serde_json::to_string(&describe(&entry))?);
            }
        }
        ShotCommand::Encode(args) => {
            let shot_type = if args.shot_type == 3 {
                ShotType::Three
            } else {
                ShotType::Two
            };
            let entry = ShotEntry::new(
                args.made,
                shot_type,
                args.attempted.unwrap_or(args.made),
                FreeThrows::new(args.ft_made, args.ft_attempted)?,
            )?;
            println!("{}", entry);
        }
        ShotCommand::Totals { line } => {
            let line = QuarterLine::parse("cli", 1, "player", &line)?;
            println!("{}", serde_json::to_string_pretty(&line.totals())?);
            println!("points: {}", line.totals().points());
        }
    }
    Ok(())
}

fn describe(entry: &ShotEntry) -> serde_json::Value {
    serde_json::json!({
        "token": entry.to_string(),
        "made": entry.made(),
        "type": entry.shot_type().points(),
        "missed": entry.missed(),
        "ft_made": entry.ft_made(),
        "ft_attempted": entry.ft_attempted(),
        "points": entry.points(),
    })
}

/// Serve the loopback callback until tokens arrive.
async fn run_callback_server(config: Config, store: Arc<dyn TokenStore>) -> anyhow::Result<()> {
    let addr = format!("127.0.0.1:{}", config.callback_port);
    let state = Arc::new(AppState::new(config, store));
    let mut absorbed = state.absorbed.subscribe();
    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local = listener.local_addr()?;
    let callback = format!("http://{}/callback", local);
    tracing::info!(address = %local, "Callback server listening");
    println!("Open this URL to sign in:");
    println!("{}", state.config.oauth_authorize_url(&callback));
    println!("Waiting for sign-in redirect to {}", callback);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = absorbed.wait_for(|done| *done).await;
        })
        .await?;
    Ok(())
}

/// Initialize structured logging on stderr.
///
/// JSON output when `COURTSIDE_LOG_JSON` is set, plain text otherwise.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var_os("COURTSIDE_LOG_JSON").is_some() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
