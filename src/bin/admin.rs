//! CLI administration tool for CMS pages and redirects.
//!
//! Provides commands for inspecting and editing content directly against the
//! database.
//!
//! # Usage
//!
//! ```bash
//! # List redirects, newest first
//! cargo run --bin content-admin -- redirect list
//!
//! # Resolve a short URL
//! cargo run --bin content-admin -- redirect resolve courses
//!
//! # Create a page with contents read from a file
//! cargo run --bin content-admin -- page add --url company/history \
//!     --title "Company history" --contents-file history.md
//!
//! # Load starter content
//! cargo run --bin content-admin -- seed
//!
//! # Check database connection
//! cargo run --bin content-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `CONTENT_ADMIN_USER`: creating user recorded for new records
//!
//! See [`content_store::config`] for the full list.

use content_store::AppError;
use content_store::config::{self, Config};
use content_store::domain::entities::{Page, Redirect};
use content_store::domain::seed::SeedData;
use content_store::logging;
use content_store::state::{AppState, PgContentService};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// CLI tool for managing site content.
#[derive(Parser)]
#[command(name = "content-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short URL redirects
    Redirect {
        #[command(subcommand)]
        action: RedirectAction,
    },

    /// Manage content pages
    Page {
        #[command(subcommand)]
        action: PageAction,
    },

    /// Import starter pages and redirects
    Seed {
        /// JSON file with `pages` and `redirects` arrays (built-in set if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Creating user for imported records
        #[arg(short, long)]
        user: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Redirect management subcommands.
#[derive(Subcommand)]
enum RedirectAction {
    /// List all redirects
    List,

    /// Show a redirect by id
    Show { id: i64 },

    /// Look up the destination of a short URL
    Resolve { short_url: String },

    /// Create a redirect
    Add {
        /// Display name (e.g., "Courses")
        #[arg(short, long)]
        name: Option<String>,

        /// Short URL key (e.g., "courses")
        #[arg(short, long)]
        short_url: Option<String>,

        /// Destination URL
        #[arg(short = 'd', long = "url")]
        url: Option<String>,

        /// Creating user (defaults to CONTENT_ADMIN_USER)
        #[arg(long)]
        user: Option<String>,
    },

    /// Replace name, short URL and destination of a redirect
    Edit {
        id: i64,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        short_url: String,

        #[arg(short = 'd', long = "url")]
        url: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Page management subcommands.
#[derive(Subcommand)]
enum PageAction {
    /// List all pages
    List,

    /// Show a page by id
    Show { id: i64 },

    /// Find a page by URL
    Find {
        url: String,

        /// Also match pages flagged as shared
        #[arg(long)]
        allow_shared: bool,
    },

    /// Create a page
    Add {
        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        contents: ContentsArgs,

        /// Mark the page as shared
        #[arg(long)]
        shared: Option<bool>,

        /// Creating user (defaults to CONTENT_ADMIN_USER)
        #[arg(long)]
        user: Option<String>,
    },

    /// Replace title, URL, contents and sharing flag of a page
    Edit {
        id: i64,

        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        contents: ContentsArgs,

        #[arg(long)]
        shared: Option<bool>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Page body, given inline or read from a file.
#[derive(clap::Args)]
#[group(multiple = false)]
struct ContentsArgs {
    /// Page contents
    #[arg(short, long)]
    contents: Option<String>,

    /// Read page contents from a file
    #[arg(long)]
    contents_file: Option<PathBuf>,
}

impl ContentsArgs {
    async fn resolve(self) -> Result<Option<String>> {
        match (self.contents, self.contents_file) {
            (Some(contents), _) => Ok(Some(contents)),
            (None, Some(path)) => {
                let contents = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(Some(contents))
            }
            (None, None) => Ok(None),
        }
    }
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and content tables
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    logging::init_tracing(&config);
    config.print_summary();

    let state = AppState::connect(&config).await?;

    match cli.command {
        Commands::Redirect { action } => handle_redirect_action(action, &state, &config).await?,
        Commands::Page { action } => handle_page_action(action, &state, &config).await?,
        Commands::Seed { file, user, yes } => {
            let user = user.unwrap_or_else(|| config.default_user.clone());
            seed(&state.content_service, file, &user, yes).await?
        }
        Commands::Db { action } => handle_db_action(action, &state).await?,
    }

    Ok(())
}

/// Dispatches redirect management commands.
async fn handle_redirect_action(
    action: RedirectAction,
    state: &AppState,
    config: &Config,
) -> Result<()> {
    let service = state.content_service.as_ref();

    match action {
        RedirectAction::List => {
            let redirects = service.all_redirects().await?;
            print_redirect_table(&redirects);
        }
        RedirectAction::Show { id } => match service.get_redirect_by_id(Some(id)).await? {
            Some(redirect) => print_redirect(&redirect),
            None => println!("{}", format!("⚠️  Redirect {id} not found").yellow()),
        },
        RedirectAction::Resolve { short_url } => match service.get_redirect(&short_url).await? {
            Some(redirect) => println!(
                "  {} → {}",
                redirect.short_url.cyan(),
                redirect.url.bright_white()
            ),
            None => println!("{}", format!("⚠️  No redirect for '{short_url}'").yellow()),
        },
        RedirectAction::Add {
            name,
            short_url,
            url,
            user,
        } => {
            let name = prompt_if_missing(name, "Name")?;
            let short_url = prompt_if_missing(short_url, "Short URL")?;
            let url = prompt_if_missing(url, "Destination URL")?;
            let user = user.unwrap_or_else(|| config.default_user.clone());

            let redirect = service
                .create_redirect(&name, &short_url, &url, &user)
                .await
                .map_err(describe_store_error)?;

            println!("{}", "✅ Redirect created".green().bold());
            print_redirect(&redirect);
        }
        RedirectAction::Edit {
            id,
            name,
            short_url,
            url,
            yes,
        } => {
            if !yes && !confirm(&format!("Overwrite redirect {id}?"))? {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            match service
                .update_redirect(id, &name, &short_url, &url)
                .await
                .map_err(describe_store_error)?
            {
                Some(redirect) => {
                    println!("{}", "✅ Redirect updated".green().bold());
                    print_redirect(&redirect);
                }
                None => println!("{}", format!("⚠️  Redirect {id} not found").yellow()),
            }
        }
    }

    Ok(())
}

/// Dispatches page management commands.
async fn handle_page_action(action: PageAction, state: &AppState, config: &Config) -> Result<()> {
    let service = state.content_service.as_ref();

    match action {
        PageAction::List => {
            let pages = service.all_pages().await?;
            print_page_table(&pages);
        }
        PageAction::Show { id } => match service.get_page_by_id(Some(id)).await? {
            Some(page) => print_page(&page),
            None => println!("{}", format!("⚠️  Page {id} not found").yellow()),
        },
        PageAction::Find { url, allow_shared } => {
            match service.get_page(&url, allow_shared).await? {
                Some(page) => print_page(&page),
                None => println!("{}", format!("⚠️  No page at '{url}'").yellow()),
            }
        }
        PageAction::Add {
            url,
            title,
            contents,
            shared,
            user,
        } => {
            let contents = contents.resolve().await?;
            let user = user.unwrap_or_else(|| config.default_user.clone());

            let page = service
                .create_page(title.as_deref(), &url, contents.as_deref(), &user, shared)
                .await
                .map_err(describe_store_error)?;

            println!("{}", "✅ Page created".green().bold());
            print_page(&page);
        }
        PageAction::Edit {
            id,
            url,
            title,
            contents,
            shared,
            yes,
        } => {
            let contents = contents.resolve().await?;

            if !yes && !confirm(&format!("Overwrite page {id}?"))? {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            match service
                .update_page(
                    id,
                    title.as_deref(),
                    Some(url.as_str()),
                    contents.as_deref(),
                    shared,
                )
                .await
                .map_err(describe_store_error)?
            {
                Some(page) => {
                    println!("{}", "✅ Page updated".green().bold());
                    print_page(&page);
                }
                None => println!(
                    "{}",
                    format!("⚠️  Page {id} not found or URL empty, nothing changed").yellow()
                ),
            }
        }
    }

    Ok(())
}

/// Imports a seed set after showing what it contains.
async fn seed(
    service: &PgContentService,
    file: Option<PathBuf>,
    user: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🌱 Import seed content".bright_blue().bold());
    println!();

    let data = match file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SeedData::from_json(&raw)
                .with_context(|| format!("Invalid seed file {}", path.display()))?
        }
        None => SeedData::defaults(),
    };

    if data.is_empty() {
        println!("{}", "  Nothing to import".yellow());
        return Ok(());
    }

    println!("  Pages:     {}", data.pages.len().to_string().cyan());
    println!("  Redirects: {}", data.redirects.len().to_string().cyan());
    println!("  User:      {}", user.cyan());
    println!();

    if !skip_confirm && !confirm("Import missing entries?")? {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let report = service
        .import_seed(&data, user)
        .await
        .map_err(describe_store_error)?;

    println!();
    println!("{}", "✅ Seed import finished".green().bold());
    println!(
        "  Pages:     {} created, {} skipped",
        report.pages_created.to_string().bright_green(),
        report.pages_skipped.to_string().bright_black()
    );
    println!(
        "  Redirects: {} created, {} skipped",
        report.redirects_created.to_string().bright_green(),
        report.redirects_skipped.to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, state: &AppState) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(state.pool.as_ref()).await?;
            println!("{}", "✅ Database connection OK".green().bold());

            for table in ["pages", "redirects"] {
                let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
                    .bind(table)
                    .fetch_one(state.pool.as_ref())
                    .await?;

                if exists {
                    println!("  {} {}", "✅".green(), table.cyan());
                } else {
                    println!("  {} {} (missing)", "❌".red(), table.cyan());
                }
            }
        }
    }

    Ok(())
}

/// Turns a store error into a readable message, naming violated constraints.
fn describe_store_error(err: AppError) -> anyhow::Error {
    if err.is_unique_violation() {
        let constraint = err.constraint().unwrap_or("unique constraint").to_string();
        return anyhow::Error::new(err).context(format!("Already exists ({constraint})"));
    }

    anyhow::Error::new(err).context("Database error")
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Prints redirects as a table.
///
/// # Output Format
///
/// ```text
///   ID  Short URL        Name                 Created           Destination
///   ─────────────────────────────────────────────────────────────────────
///   2   bytes            Python Bytes         2024-01-16 14:20  https://pythonbytes.fm/
/// ```
fn print_redirect_table(redirects: &[Redirect]) {
    println!("{}", "🔀 Redirects".bright_blue().bold());
    println!();

    if redirects.is_empty() {
        println!("{}", "  No redirects found".yellow());
        return;
    }

    println!(
        "  {:<4} {:<16} {:<20} {:<17} {}",
        "ID".bright_white().bold(),
        "Short URL".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for redirect in redirects {
        println!(
            "  {:<4} {:<16} {:<20} {:<17} {}",
            redirect.id.to_string().bright_black(),
            redirect.short_url.cyan(),
            redirect.name,
            redirect
                .created_date
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            redirect.url
        );
    }

    println!();
    println!(
        "  Total: {}",
        redirects.len().to_string().bright_white().bold()
    );
    println!();
}

fn print_redirect(redirect: &Redirect) {
    println!();
    println!("  ID:        {}", redirect.id.to_string().bright_black());
    println!("  Name:      {}", redirect.name.cyan());
    println!("  Short URL: {}", redirect.short_url.bright_yellow());
    println!("  URL:       {}", redirect.url);
    println!("  Author:    {}", redirect.creating_user);
    println!(
        "  Created:   {}",
        redirect.created_date.format("%Y-%m-%d %H:%M")
    );
    println!();
}

/// Prints pages as a table with their sharing status.
fn print_page_table(pages: &[Page]) {
    println!("{}", "📄 Pages".bright_blue().bold());
    println!();

    if pages.is_empty() {
        println!("{}", "  No pages found".yellow());
        return;
    }

    println!(
        "  {:<4} {:<28} {:<28} {:<17} {}",
        "ID".bright_white().bold(),
        "URL".bright_white().bold(),
        "Title".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for page in pages {
        println!(
            "  {:<4} {:<28} {:<28} {:<17} {}",
            page.id.to_string().bright_black(),
            page.url.cyan(),
            page.title.as_deref().unwrap_or("-"),
            page.created_date
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            share_status(page)
        );
    }

    println!();
    println!("  Total: {}", pages.len().to_string().bright_white().bold());
    println!();
}

fn print_page(page: &Page) {
    println!();
    println!("  ID:      {}", page.id.to_string().bright_black());
    println!("  URL:     {}", page.url.bright_yellow());
    println!("  Title:   {}", page.title.as_deref().unwrap_or("-").cyan());
    println!("  Status:  {}", share_status(page));
    println!("  Author:  {}", page.creating_user);
    println!("  Created: {}", page.created_date.format("%Y-%m-%d %H:%M"));
    if let Some(contents) = &page.contents {
        println!();
        println!("{}", contents);
    }
    println!();
}

fn share_status(page: &Page) -> ColoredString {
    if page.is_shared() {
        "SHARED".yellow()
    } else {
        "PRIVATE".green()
    }
}
