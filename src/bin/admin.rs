//! CLI administration tool for short-url-service.
//!
//! Registers users, inspects their urls and reports store statistics
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a user and print the API key
//! cargo run --bin admin -- user create --email jane@example.com
//!
//! # Show a user by id
//! cargo run --bin admin -- user show --id 1
//!
//! # List a user's urls
//! cargo run --bin admin -- urls list --email jane@example.com --page 2
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use short_url_service::application::services::{UrlService, UserService};
use short_url_service::config::Config;
use short_url_service::infrastructure::persistence::{PgUrlRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-url-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect urls
    Urls {
        #[command(subcommand)]
        action: UrlsAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a user and print its API key
    Create {
        /// Email, either bare or `Name <address>`
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a user by id
    Show {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum UrlsAction {
    /// List a user's urls, newest first
    List {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        page: Option<String>,
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

    let database_url = Config::load_database_url().context("Database is not configured")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Urls { action } => handle_urls_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let service = UserService::new(Arc::new(PgUserRepository::new(Arc::new(pool.clone()))));

    match action {
        UserAction::Create { email, yes } => create_user(&service, email, yes).await,
        UserAction::Show { id } => {
            let user = service
                .find_by_id(&id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "User".bright_blue().bold());
            println!("  Id:      {}", user.id.to_string().cyan());
            println!("  Email:   {}", user.email.cyan());
            println!(
                "  Created: {}",
                user.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
            );
            println!();

            Ok(())
        }
    }
}

/// Registers a user with interactive prompts.
///
/// The key is printed once; only the key itself is stored, so it cannot be
/// shown again.
async fn create_user(
    service: &UserService<PgUserRepository>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    println!("  Email: {}", email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Register this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let api_key = service
        .register(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "User created".green().bold());
    println!("  API key: {}", api_key.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "IMPORTANT: Save this key now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"X-Api-Key: {}\" 'http://localhost:3000/api/short?long_url=example.com'",
        api_key.bright_yellow()
    );
    println!();

    Ok(())
}

async fn handle_urls_action(action: UrlsAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let users = UserService::new(Arc::new(PgUserRepository::new(pool.clone())));
    let urls = UrlService::new(Arc::new(PgUrlRepository::new(pool)));

    match action {
        UrlsAction::List { email, page } => {
            let user = users
                .find_by_email(&email)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            let summaries = urls
                .list_urls(user.id, page.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{} {}", "Urls of".bright_blue().bold(), user.email.cyan());
            println!();

            if summaries.is_empty() {
                println!("{}", "  No urls found".yellow());
                return Ok(());
            }

            println!(
                "  {:<10} {:<20} {:<8} {}",
                "Code".bright_white().bold(),
                "Created".bright_white().bold(),
                "Hits".bright_white().bold(),
                "Long url".bright_white().bold()
            );
            println!("  {}", "-".repeat(75).bright_black());

            for s in &summaries {
                println!(
                    "  {:<10} {:<20} {:<8} {}",
                    s.code.cyan(),
                    s.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black(),
                    s.total_accesses.to_string().bright_green(),
                    s.long_url
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Displays user, url and access counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let accesses_count: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(cardinality(url_access)), 0)::BIGINT FROM urls")
            .fetch_one(pool)
            .await?;

    println!(
        "  Users:    {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Urls:     {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Accesses: {}",
        accesses_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
