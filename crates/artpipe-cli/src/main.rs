//! CLI entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together: settings
//! come from the environment, clients are constructed per deployment
//! credentials, and the resolver replies through a console stand-in for
//! the chat sink the production router would pass.

mod bootstrap;
mod cli;
mod sink;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = cli::Cli::parse();
    let settings = bootstrap::settings_from_env();
    let resolver = bootstrap::build_resolver(&settings)?;
    let sink = sink::ConsoleSink;

    match args.command {
        cli::Commands::Github { repo, version } => {
            resolver
                .resolve_from_github(&sink, &repo, version.as_deref())
                .await;
        }
        cli::Commands::Distgit { name, version } => {
            resolver
                .resolve_from_distgit(&sink, &name, version.as_deref())
                .await;
        }
        cli::Commands::Brew { package, version } => {
            resolver
                .resolve_from_brew(&sink, &package, version.as_deref())
                .await;
        }
        cli::Commands::Cdn { name, version } => {
            resolver
                .resolve_from_cdn(&sink, &name, version.as_deref())
                .await;
        }
        cli::Commands::Image { name, version } => {
            resolver
                .resolve_from_delivery(&sink, &name, version.as_deref())
                .await;
        }
    }
    Ok(())
}
