//! CLI administration tool for shortlink.
//!
//! Works directly on the store file, so the server must not be running
//! against the same `STORE_PATH` (redb holds an exclusive file lock).
//!
//! # Usage
//!
//! ```bash
//! # Create a short link
//! cargo run --bin admin -- shorten example.com --ttl 3600 --length 10
//!
//! # Look up an id
//! cargo run --bin admin -- resolve 3f1c9a0b
//!
//! # Remove expired links
//! cargo run --bin admin -- purge
//!
//! # Check that the store opens and reads
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (see `shortlink::config`),
//! most importantly `STORE_PATH`.

use shortlink::application::services::{PostOptions, Shortener, ShortenerError};
use shortlink::config::Config;
use shortlink::logging::NullLogger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store file (overrides STORE_PATH)
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten; a missing scheme defaults to http
        url: String,

        /// Lifetime in seconds (defaults to DEFAULT_TTL_SECONDS)
        #[arg(short, long)]
        ttl: Option<u64>,

        /// Id length in hex characters (defaults to DEFAULT_ID_LENGTH)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=64))]
        length: Option<u64>,
    },

    /// Show the URL an id redirects to
    Resolve {
        /// Short id
        id: String,
    },

    /// Delete expired links from the store
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Check that the store opens and serves reads
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    config.validate()?;

    let shortener = Shortener::open(config.shortener_config(Arc::new(NullLogger)))
        .with_context(|| format!("Failed to open store at {}", config.store_path.display()))?;

    let result = match cli.command {
        Commands::Shorten { url, ttl, length } => shorten(&shortener, &url, ttl, length).await,
        Commands::Resolve { id } => resolve(&shortener, &id).await,
        Commands::Purge { yes } => purge(&shortener, yes).await,
        Commands::Check => check(&shortener, &config).await,
    };

    shortener.close().await?;
    result
}

/// Creates a link and prints its id.
async fn shorten(
    shortener: &Shortener,
    url: &str,
    ttl: Option<u64>,
    length: Option<u64>,
) -> Result<()> {
    let mut options = PostOptions::default();
    if let Some(secs) = ttl {
        options = options.with_ttl(Duration::from_secs(secs));
    }
    if let Some(length) = length {
        options = options.with_length(usize::try_from(length)?);
    }

    let link = shortener
        .post_link(url, options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "Link created".green().bold());
    println!("  Id:      {}", link.id.bright_yellow().bold());
    println!("  Target:  {}", link.url.cyan());
    match link.expires_at {
        Some(at) => println!(
            "  Expires: {}",
            at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
        ),
        None => println!("  Expires: {}", "never".bright_black()),
    }

    Ok(())
}

/// Prints the target of an id.
async fn resolve(shortener: &Shortener, id: &str) -> Result<()> {
    match shortener.get_link(id).await {
        Ok(link) => {
            println!("  {} -> {}", link.id.bright_yellow(), link.url.cyan());
            if let Some(at) = link.expires_at {
                println!(
                    "  Expires: {}",
                    at.format("%Y-%m-%d %H:%M:%S UTC").to_string().bright_black()
                );
            }
            Ok(())
        }
        Err(ShortenerError::NotFound { id }) => {
            println!("{} {}", "No live link for".yellow(), id.bright_white());
            anyhow::bail!("Link {} not found or expired", id)
        }
        Err(e) => Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }
}

/// Removes expired links after confirmation.
async fn purge(shortener: &Shortener, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all expired links?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let removed = shortener
        .purge_expired()
        .await
        .map_err(|e| anyhow::anyhow!("Purge failed: {}", e))?;

    println!(
        "{} {}",
        "Expired links removed:".green(),
        removed.to_string().bright_white().bold()
    );

    Ok(())
}

/// Reports store health.
async fn check(shortener: &Shortener, config: &Config) -> Result<()> {
    println!("  Store: {}", config.store_path.display().to_string().cyan());

    if shortener.health_check().await {
        println!("  Status: {}", "OK".green().bold());
        Ok(())
    } else {
        println!("  Status: {}", "UNREADABLE".red().bold());
        anyhow::bail!("Store health check failed")
    }
}
