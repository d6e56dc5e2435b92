//! CLI administration tool for fitness-tracker.
//!
//! Provides commands for managing API tokens, running pace calculations,
//! printing a user's running summary, and performing database checks without
//! requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a new API token for a user
//! cargo run --bin admin -- token create --name "Phone" --user runner-1
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Phone"
//!
//! # Pace calculator (no database needed)
//! cargo run --bin admin -- pace distance --duration 30 --pace 5:00
//!
//! # Running summary for a user
//! cargo run --bin admin -- summary --user runner-1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection (all but `pace`)
//! - `TOKEN_SIGNING_SECRET`: HMAC key, required by `token create`

use fitness_tracker::application::RunningStore;
use fitness_tracker::application::services::{AuthService, RunningService};
use fitness_tracker::config::Config;
use fitness_tracker::domain::identity::StaticIdentity;
use fitness_tracker::domain::repositories::TokenRepository;
use fitness_tracker::infrastructure::persistence::{PgRunningSessionRepository, PgTokenRepository};
use fitness_tracker::utils::pace::{
    distance_from_time_and_pace, pace_from_distance_and_time, time_from_distance_and_pace,
};
use fitness_tracker::utils::token::generate_token;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing fitness-tracker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Pace, distance and time calculations
    Pace {
        #[command(subcommand)]
        action: PaceAction,
    },

    /// Show a user's running summary
    Summary {
        /// User uid
        #[arg(short, long)]
        user: String,

        /// Only consider the N most recent sessions
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Token name (e.g., "Phone", "Garmin sync")
        #[arg(short, long)]
        name: Option<String>,

        /// User uid the token authenticates as
        #[arg(short, long)]
        user: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

/// Calculator subcommands. Durations are in minutes, paces in `M:SS`.
#[derive(Subcommand)]
enum PaceAction {
    /// Distance covered in a duration at a pace
    Distance {
        #[arg(long)]
        duration: f64,
        #[arg(long)]
        pace: String,
    },

    /// Pace needed to cover a distance in a duration
    Pace {
        #[arg(long)]
        distance: f64,
        #[arg(long)]
        duration: f64,
    },

    /// Time needed to cover a distance at a pace
    Time {
        #[arg(long)]
        distance: f64,
        #[arg(long)]
        pace: String,
    },
}

/// Database operation subcommands.
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

    match cli.command {
        Commands::Pace { action } => {
            handle_pace_action(action);
            Ok(())
        }
        command => run_with_database(command).await,
    }
}

/// Runs a command that needs PostgreSQL.
async fn run_with_database(command: Commands) -> Result<()> {
    let database_url = Config::load_database_url()?
        .context("DATABASE_URL (or DB_HOST/DB_USER/DB_PASSWORD/DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match command {
        Commands::Token { action } => handle_token_action(action, &pool).await,
        Commands::Summary { user, limit } => handle_summary(&pool, user, limit).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
        Commands::Pace { action } => {
            handle_pace_action(action);
            Ok(())
        }
    }
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            name,
            user,
            token,
            yes,
        } => {
            create_token(repo, name, user, token, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for token name and user uid (or use provided)
/// 2. Generate random token or use provided value
/// 3. Display token details with warning
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Store the HMAC hash, bound to the user
///
/// The raw token is displayed once and cannot be retrieved later.
async fn create_token(
    repo: Arc<PgTokenRepository>,
    name: Option<String>,
    user: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let signing_secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    if signing_secret.is_empty() {
        anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
    }

    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Phone")
            .interact_text()?,
    };

    let user_uid = match user {
        Some(u) => u,
        None => Input::new().with_prompt("User uid").interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Name:  {}", token_name.cyan());
    println!("  User:  {}", user_uid.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let auth = AuthService::new(repo, signing_secret);
    auth.issue_token(&token_name, &user_uid, &token_value)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/running/summary",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  Name                 User                 Created           Status
///   ───────────────────────────────────────────────────────────────────────────
///   1   Phone                runner-1             2026-01-15 10:30  ACTIVE
///   2   Old laptop           runner-1             2026-01-16 14:20  REVOKED
/// ```
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<20} {:<17} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "User".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<20} {:<20} {:<17} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.user_uid,
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  User:  {}", token.user_uid.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Prints a calculator result, or a notice when the inputs give none.
fn print_result(label: &str, value: Option<String>) {
    match value {
        Some(v) => println!("  {}: {}", label, v.bright_green().bold()),
        None => println!("  {}: {}", label, "no result for these inputs".yellow()),
    }
}

fn handle_pace_action(action: PaceAction) {
    println!("{}", "⏱️  Pace Calculator".bright_blue().bold());
    println!();

    match action {
        PaceAction::Distance { duration, pace } => print_result(
            "Distance",
            distance_from_time_and_pace(duration, &pace).map(|d| format!("{d:.2}")),
        ),
        PaceAction::Pace { distance, duration } => print_result(
            "Pace",
            pace_from_distance_and_time(distance, duration).map(|p| format!("{p} /km")),
        ),
        PaceAction::Time { distance, pace } => print_result(
            "Time",
            time_from_distance_and_pace(distance, &pace).map(|t| format!("{t:.2} min")),
        ),
    }

    println!();
}

/// Loads a user's sessions through [`RunningStore`] and prints the summary.
async fn handle_summary(pool: &PgPool, user: String, limit: Option<i64>) -> Result<()> {
    let repo = Arc::new(PgRunningSessionRepository::new(Arc::new(pool.clone())));
    let store = RunningStore::new(
        Arc::new(RunningService::new(repo)),
        Arc::new(StaticIdentity::signed_in(user.as_str())),
    );

    store.fetch_sessions(limit).await;
    if let Some(error) = store.error() {
        anyhow::bail!("Failed to load sessions: {error}");
    }

    let summary = store.summary(Utc::now().date_naive());

    println!(
        "{} {}",
        "🏃 Running Summary for".bright_blue().bold(),
        user.cyan().bold()
    );
    println!();
    println!(
        "  Sessions:        {}",
        summary.total_sessions.to_string().bright_green().bold()
    );
    println!(
        "  This week:       {}",
        summary.week_sessions.to_string().bright_green().bold()
    );
    println!(
        "  Total distance:  {}",
        format!("{:.2}", summary.total_distance).bright_green().bold()
    );
    println!(
        "  Week distance:   {}",
        format!("{:.2}", summary.week_distance).bright_green().bold()
    );
    println!(
        "  Best pace:       {}",
        summary
            .best_pace
            .as_deref()
            .unwrap_or("-")
            .bright_green()
            .bold()
    );

    if !summary.recent.is_empty() {
        println!();
        println!("{}", "  Recent:".bright_white().bold());
        for session in &summary.recent {
            println!(
                "    {}  {:<9} {:>7}  {}",
                session.date.to_string().bright_black(),
                session.run_type.as_str(),
                session
                    .distance
                    .map(|d| format!("{d:.2}"))
                    .unwrap_or_else(|| "-".to_string()),
                session.average_pace.as_deref().unwrap_or("-")
            );
        }
    }
    println!();

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

            let running: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM running_sessions")
                .fetch_one(pool)
                .await?;
            let gym: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gym_sessions")
                .fetch_one(pool)
                .await?;
            let exercises: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises")
                .fetch_one(pool)
                .await?;
            let tokens: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL:       {}", version.bright_white());
            println!(
                "  Running sessions: {}",
                running.to_string().bright_green().bold()
            );
            println!("  Gym sessions:     {}", gym.to_string().bright_green().bold());
            println!(
                "  Exercises:        {}",
                exercises.to_string().bright_green().bold()
            );
            println!(
                "  Active tokens:    {}",
                tokens.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
