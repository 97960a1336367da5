//! Check stored companies and jobs against the rules the API enforces on input.
//!
//! Rows written before a rule existed (or by hand) are reported; `--fix` clears
//! the fields that can safely be nulled.

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::Row;
use std::env;
use validator::ValidateUrl;

use jobly::domain::validation::{EQUITY_MAX, EQUITY_MIN, HANDLE_MAX_LENGTH, HANDLE_PATTERN};

#[derive(Parser)]
#[command(about = "Validate Jobly rows against API constraints")]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    /// Null out invalid optional fields
    #[arg(long)]
    fix: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set or passed with --database-url")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .context("connecting to database")?;

    // Handles are primary keys and referenced by jobs; report only.
    let companies = sqlx::query("SELECT handle, logo_url FROM companies ORDER BY handle")
        .fetch_all(&pool)
        .await?;

    let mut bad_handles = 0;
    let mut bad_logos = 0;
    for row in companies.iter() {
        let handle: String = row.get("handle");
        if handle.len() as u64 > HANDLE_MAX_LENGTH || !HANDLE_PATTERN.is_match(&handle) {
            bad_handles += 1;
            println!("invalid handle: {:?}", handle);
        }

        let logo_url: Option<String> = row.get("logo_url");
        if let Some(url) = logo_url.filter(|url| !url.validate_url()) {
            bad_logos += 1;
            println!("company {}: invalid logo_url {:?}", handle, url);
            if cli.fix {
                sqlx::query("UPDATE companies SET logo_url = NULL WHERE handle = $1")
                    .bind(&handle)
                    .execute(&pool)
                    .await?;
                println!("Fixed: {} logo_url -> NULL", handle);
            }
        }
    }
    println!("Invalid handles: {}", bad_handles);
    println!("Invalid logo_url rows: {}", bad_logos);

    let bad_equity = sqlx::query(
        "SELECT id, equity::float8 AS equity FROM jobs WHERE equity < $1 OR equity > $2",
    )
    .bind(EQUITY_MIN)
    .bind(EQUITY_MAX)
    .fetch_all(&pool)
    .await?;

    println!("Invalid equity rows: {}", bad_equity.len());
    for row in bad_equity.iter() {
        let id: i32 = row.get("id");
        let equity: f64 = row.get("equity");
        println!("job {}: equity {}", id, equity);
        if cli.fix {
            sqlx::query("UPDATE jobs SET equity = NULL WHERE id = $1")
                .bind(id)
                .execute(&pool)
                .await?;
            println!("Fixed: job {} equity -> NULL", id);
        }
    }

    let bad_titles = sqlx::query("SELECT id FROM jobs WHERE length(trim(title)) = 0")
        .fetch_all(&pool)
        .await?;
    println!("Empty job titles: {}", bad_titles.len());
    for row in bad_titles.iter() {
        let id: i32 = row.get("id");
        println!("job {}: empty title", id);
    }

    Ok(())
}
