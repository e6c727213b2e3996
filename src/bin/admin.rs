//! CLI administration tool for url-mesh.
//!
//! Reads the relational store directly, without going through the services.
//!
//! # Usage
//!
//! ```bash
//! # Totals and most redirected URLs
//! cargo run --bin admin -- stats --top 5
//!
//! # Show one mapping
//! cargo run --bin admin -- lookup 3yQ8tKcNw1A
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `BASE_URL` (optional): prefix used when printing short URLs

use url_mesh::config::{Config, ServiceKind};
use url_mesh::domain::repositories::UrlRepository;
use url_mesh::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting url-mesh data.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show totals and the most redirected URLs
    Stats {
        /// Number of top URLs to list
        #[arg(short, long, default_value_t = 10)]
        top: i64,
    },

    /// Show the stored mapping for a short key
    Lookup {
        short_key: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env(ServiceKind::Shortener)?;
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    match cli.command {
        Commands::Stats { top } => handle_stats(&repo, &config.base_url, top).await?,
        Commands::Lookup { short_key } => handle_lookup(&repo, &config.base_url, &short_key).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays totals and the top URLs by redirect count.
async fn handle_stats(repo: &PgUrlRepository, base_url: &str, top: i64) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let urls = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;
    let redirects = repo
        .total_redirects()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("  URLs:      {}", urls.to_string().bright_green().bold());
    println!("  Redirects: {}", redirects.to_string().bright_green().bold());
    println!();

    if top <= 0 || urls == 0 {
        return Ok(());
    }

    let entries = repo
        .top_by_redirects(top)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!("{}", format!("Top {} by redirects", entries.len()).bold());
    for entry in entries {
        println!(
            "  {:>8}  {}  {}",
            entry.redirects.to_string().bright_green(),
            entry.short_url(base_url).cyan(),
            entry.long_url.bright_black()
        );
    }
    println!();

    Ok(())
}

async fn handle_lookup(repo: &PgUrlRepository, base_url: &str, short_key: &str) -> Result<()> {
    let record = repo
        .find_by_key(short_key)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(record) = record else {
        println!("{}", format!("❌ No URL stored for '{short_key}'").red());
        return Ok(());
    };

    println!("  Short URL: {}", record.short_url(base_url).cyan());
    println!("  Long URL:  {}", record.long_url.bright_white());
    println!(
        "  Created:   {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Redirects: {}",
        record.redirects.to_string().bright_green().bold()
    );

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let table_exists: bool = sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = 'urls')",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  urls table: {}",
                if table_exists {
                    "present".green()
                } else {
                    "missing (run a service to migrate)".yellow()
                }
            );
            println!();
        }
    }

    Ok(())
}
