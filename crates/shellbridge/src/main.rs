//! shellbridge - exercise the mobile authenticator without a mobile shell
//!
//! Main entry point for the shellbridge CLI. The native host is simulated
//! in-process; see `simulator.rs`.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod simulator;

use commands::{auth, session, token};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// shellbridge - drive the native-shell authenticator against a simulated host
#[derive(Parser)]
#[command(name = "shellbridge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: $XDG_CONFIG_HOME/shellbridge/config.toml)
    #[arg(long, global = true, env = "SHELLBRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the host login flow
    Login,

    /// Run the host logout flow
    Logout,

    /// Make the host's access token act as expired
    ExpireAccess,

    /// Make the host's refresh token act as expired
    ExpireRefresh,

    /// Decorate an API request with the host's access token
    Token(token::TokenArgs),

    /// Log in, call an API twice (first attempt and retry), then log out
    Session(session::SessionArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "shellbridge=debug,shellbridge_auth=debug,shellbridge_bridge=debug,shellbridge_events=debug,info"
    } else {
        "shellbridge=info,shellbridge_auth=info,shellbridge_bridge=warn,warn"
    };

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let app_config = config::load(cli.config.as_deref())?;

    let ctx = commands::Context {
        config: app_config,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Login => auth::run(auth::AuthAction::Login, &ctx).await,
        Commands::Logout => auth::run(auth::AuthAction::Logout, &ctx).await,
        Commands::ExpireAccess => auth::run(auth::AuthAction::ExpireAccess, &ctx).await,
        Commands::ExpireRefresh => auth::run(auth::AuthAction::ExpireRefresh, &ctx).await,
        Commands::Token(args) => token::run(args, &ctx).await,
        Commands::Session(args) => session::run(args, &ctx).await,
    }
}
