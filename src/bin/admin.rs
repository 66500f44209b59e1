//! CLI administration tool for algo-community.
//!
//! Provides commands for managing member roles, access tokens and ranks,
//! viewing statistics, and performing database operations without requiring
//! HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Grant or remove the admin role
//! cargo run --bin admin -- member promote alice@example.com
//! cargo run --bin admin -- member demote alice@example.com
//!
//! # List or revoke a member's access tokens
//! cargo run --bin admin -- member tokens alice@example.com
//! cargo run --bin admin -- member revoke-tokens alice@example.com
//!
//! # Manage ranks
//! cargo run --bin admin -- rank list
//! cargo run --bin admin -- rank create --name Master --min-point 2000
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
//! - `DATABASE_URL` (required): PostgreSQL connection string

use algo_community::domain::entities::{Member, MemberRole};
use algo_community::domain::repositories::{MemberRepository, TokenRepository};
use algo_community::infrastructure::persistence::{PgMemberRepository, PgTokenRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing algo-community.
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
    /// Manage member roles and tokens
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Manage member ranks
    Rank {
        #[command(subcommand)]
        action: RankAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Member management subcommands.
#[derive(Subcommand)]
enum MemberAction {
    /// Grant the admin role
    Promote {
        /// Member email
        email: String,
    },

    /// Revoke the admin role
    Demote {
        /// Member email
        email: String,
    },

    /// List a member's access tokens
    Tokens {
        /// Member email
        email: String,
    },

    /// Revoke every active token of a member
    RevokeTokens {
        /// Member email
        email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Rank management subcommands.
#[derive(Subcommand)]
enum RankAction {
    /// List ranks by required points
    List,

    /// Create a new rank
    Create {
        /// Rank name (e.g., "Master")
        #[arg(short, long)]
        name: Option<String>,

        /// Points needed to reach the rank
        #[arg(short, long)]
        min_point: Option<i32>,
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Member { action } => handle_member_action(action, &pool).await?,
        Commands::Rank { action } => handle_rank_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches member management commands.
async fn handle_member_action(action: MemberAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let members = PgMemberRepository::new(pool.clone());
    let tokens = PgTokenRepository::new(pool);

    match action {
        MemberAction::Promote { email } => {
            set_role(&members, &email, MemberRole::Admin).await?;
        }
        MemberAction::Demote { email } => {
            set_role(&members, &email, MemberRole::User).await?;
        }
        MemberAction::Tokens { email } => {
            let member = find_member(&members, &email).await?;
            list_tokens(&tokens, &member).await?;
        }
        MemberAction::RevokeTokens { email, yes } => {
            let member = find_member(&members, &email).await?;
            revoke_tokens(&tokens, &member, yes).await?;
        }
    }

    Ok(())
}

async fn find_member(repo: &PgMemberRepository, email: &str) -> Result<Member> {
    let email = email.trim().to_lowercase();

    repo.find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Member '{}' not found", email))
}

/// Changes a member's platform role.
///
/// The new role applies to the next request; existing tokens stay valid.
async fn set_role(repo: &PgMemberRepository, email: &str, role: MemberRole) -> Result<()> {
    println!("{}", "👤 Change Member Role".bright_blue().bold());
    println!();

    let member = find_member(repo, email).await?;

    if member.role == role {
        println!(
            "{}",
            format!("⚠️  {} already has role {}", member.nickname, role).yellow()
        );
        return Ok(());
    }

    println!("  Member: {} <{}>", member.nickname.cyan(), member.email);
    println!(
        "  Role:   {} → {}",
        member.role.to_string().bright_black(),
        role.to_string().bright_white().bold()
    );
    println!();

    repo.set_role(member.id, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to change role: {}", e))?;

    println!("{}", "✅ Role updated successfully!".green().bold());
    println!();

    Ok(())
}

/// Lists a member's access tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 🔑 Access Tokens for alice
///
///   ID  Name                   Created              Last used            Status
///   ─────────────────────────────────────────────────────────────────────────────
///   1   login                  2025-09-01 10:30     2025-09-02 08:12     ACTIVE
///   2   login                  2025-08-20 14:20     never                REVOKED
/// ```
async fn list_tokens(repo: &PgTokenRepository, member: &Member) -> Result<()> {
    println!(
        "{} {}",
        "🔑 Access Tokens for".bright_blue().bold(),
        member.nickname.bright_blue().bold()
    );
    println!();

    let tokens = repo
        .list_for_member(member.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<22} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<5} {:<22} {:<20} {:<20} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
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

/// Revokes all active tokens of a member, forcing a new login.
///
/// Requires confirmation (default: No) unless `--yes` is given.
async fn revoke_tokens(repo: &PgTokenRepository, member: &Member, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔒 Revoke Access Tokens".bright_blue().bold());
    println!();
    println!("  Member: {} <{}>", member.nickname.cyan(), member.email);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Revoke every active token of this member?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let revoked = repo
        .revoke_all_for_member(member.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke tokens: {}", e))?;

    println!();
    if revoked == 0 {
        println!("{}", "⚠️  No active tokens to revoke".yellow());
    } else {
        println!(
            "{}",
            format!("✅ Revoked {} token(s)", revoked).green().bold()
        );
    }
    println!();

    Ok(())
}

/// Dispatches rank management commands.
async fn handle_rank_action(action: RankAction, pool: &PgPool) -> Result<()> {
    match action {
        RankAction::List => list_ranks(pool).await,
        RankAction::Create { name, min_point } => create_rank(pool, name, min_point).await,
    }
}

async fn list_ranks(pool: &PgPool) -> Result<()> {
    println!("{}", "🏅 Ranks".bright_blue().bold());
    println!();

    let ranks: Vec<(i64, String, i32, i64)> = sqlx::query_as(
        r#"
        SELECT r.id, r.name, r.min_point, COUNT(m.id)
        FROM member_ranks r
        LEFT JOIN members m ON m.rank_id = r.id
        GROUP BY r.id, r.name, r.min_point
        ORDER BY r.min_point
        "#,
    )
    .fetch_all(pool)
    .await?;

    println!(
        "  {:<4} {:<20} {:<12} {:<8}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Min points".bright_white().bold(),
        "Members".bright_white().bold()
    );
    println!("  {}", "─".repeat(48).bright_black());

    for (id, name, min_point, members) in &ranks {
        println!(
            "  {:<4} {:<20} {:<12} {}",
            id.to_string().bright_black(),
            name.cyan(),
            min_point,
            members.to_string().bright_green()
        );
    }
    println!();

    Ok(())
}

/// Creates a rank with interactive prompts for missing values.
///
/// Existing members keep their rank until their points next change.
async fn create_rank(pool: &PgPool, name: Option<String>, min_point: Option<i32>) -> Result<()> {
    println!("{}", "🏅 Create Rank".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Rank name").interact_text()?,
    };

    let min_point = match min_point {
        Some(p) => p,
        None => Input::new().with_prompt("Minimum points").interact_text()?,
    };

    if name.trim().is_empty() {
        anyhow::bail!("Rank name must not be empty");
    }
    if min_point < 0 {
        anyhow::bail!("Minimum points must not be negative, got {}", min_point);
    }

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO member_ranks (id, name, min_point)
        SELECT COALESCE(MAX(id), 0) + 1, $1, $2 FROM member_ranks
        RETURNING id
        "#,
    )
    .bind(name.trim())
    .bind(min_point)
    .fetch_one(pool)
    .await
    .context("Failed to create rank (name and minimum points must be unique)")?;

    println!(
        "{}",
        format!("✅ Rank '{}' created with id {}", name.trim(), id)
            .green()
            .bold()
    );
    println!();

    Ok(())
}

/// Displays platform statistics.
///
/// Shows member, post and study counts across all boards.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let rows: [(&str, &str); 8] = [
        ("Members", "SELECT COUNT(*) FROM members"),
        (
            "Admins",
            "SELECT COUNT(*) FROM members WHERE role = 'ADMIN'",
        ),
        (
            "Algo posts",
            "SELECT COUNT(*) FROM algo_posts WHERE visible",
        ),
        (
            "Coding posts",
            "SELECT COUNT(*) FROM coding_posts WHERE visible",
        ),
        (
            "Recruit posts",
            "SELECT COUNT(*) FROM study_recruit_posts WHERE visible",
        ),
        ("Studies", "SELECT COUNT(*) FROM studies"),
        ("Likes", "SELECT COUNT(*) FROM likes"),
        (
            "Active tokens",
            "SELECT COUNT(*) FROM member_tokens WHERE revoked_at IS NULL",
        ),
    ];

    for (label, query) in rows {
        let count: i64 = sqlx::query_scalar(query).fetch_one(pool).await?;
        println!(
            "  {:<15} {}",
            format!("{}:", label),
            count.to_string().bright_green().bold()
        );
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

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
