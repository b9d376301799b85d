//! hnfeed CLI
//!
//! Command-line interface for the hnfeed newest-stories service.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hnfeed_api::{ApiConfig, ApiServer, AppState};
use hnfeed_core::traits::StoryFeed;
use hnfeed_core::types::{normalize_search_term, Page, PageRequest, Story};

/// hnfeed - newest Hacker News stories, paginated and searchable
#[derive(Parser)]
#[command(name = "hnfeed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Upstream API base URL
    #[arg(long, global = true, env = "HN_API_BASE_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Print one page of newest stories
    Newest {
        /// Page number (values below 1 become 1)
        #[arg(short, long, allow_negative_numbers = true)]
        page: Option<i64>,
        /// Page size (below 1 becomes 10, above 50 becomes 50)
        #[arg(short = 's', long, allow_negative_numbers = true)]
        page_size: Option<i64>,
        /// Case-insensitive filter on title and author
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Print the number of newest stories
    Count {
        /// Case-insensitive filter on title and author
        #[arg(short = 'q', long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "hnfeed=debug,info"
    } else {
        "hnfeed=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = ApiConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(config, port, &bind).await,
        Commands::Newest { page, page_size, search } => {
            cmd_newest(config, page, page_size, search.as_deref()).await
        }
        Commands::Count { search } => cmd_count(config, search.as_deref()).await,
    }
}

/// Builds the same pipeline the server uses.
fn build_feed(config: &ApiConfig) -> Result<Arc<dyn StoryFeed>> {
    let state = AppState::new(config.clone()).context("Failed to configure story feed")?;
    Ok(state.feed)
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Run API server
async fn cmd_serve(config: ApiConfig, port: u16, bind: &str) -> Result<()> {
    println!("{}", "🚀 Starting hnfeed API server...".cyan().bold());
    println!("   {} http://{}:{}/api/stories", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("   {} {}", "Upstream:".dimmed(), config.api_base_url);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Failed to configure API server")?;

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}

/// Print one page of newest stories
async fn cmd_newest(
    config: ApiConfig,
    page: Option<i64>,
    page_size: Option<i64>,
    search: Option<&str>,
) -> Result<()> {
    let feed = build_feed(&config)?;
    let request = PageRequest::clamped(page, page_size);
    let search = normalize_search_term(search);

    let pb = spinner("Fetching newest stories...")?;
    let items = feed
        .list_newest(request, search)
        .await
        .context("Failed to list newest stories")?;
    let total = feed
        .count_newest(search)
        .await
        .context("Failed to count newest stories")?;
    pb.finish_and_clear();

    print_page(&Page::new(items, request, total), search);
    Ok(())
}

/// Print the number of newest stories
async fn cmd_count(config: ApiConfig, search: Option<&str>) -> Result<()> {
    let feed = build_feed(&config)?;
    let search = normalize_search_term(search);

    let pb = spinner("Counting newest stories...")?;
    let total = feed
        .count_newest(search)
        .await
        .context("Failed to count newest stories")?;
    pb.finish_and_clear();

    match search {
        Some(term) => println!("{} {} matching \"{}\"", "✅".green(), total, term),
        None => println!("{} {} newest stories", "✅".green(), total),
    }
    Ok(())
}

fn print_page(page: &Page<Story>, search: Option<&str>) {
    let heading = match search {
        Some(term) => format!("📰 Newest stories matching \"{}\"", term),
        None => "📰 Newest stories".to_string(),
    };
    println!("\n{}", heading.cyan().bold());

    if page.items.is_empty() {
        println!("\n{}", "No stories on this page.".yellow());
    }

    let first = first_position(page);
    for (i, story) in page.items.iter().enumerate() {
        println!(
            "\n{:>4}. {}",
            first.saturating_add(i),
            story.title.as_deref().unwrap_or("(untitled)").bold()
        );
        if let Some(url) = &story.url {
            println!("      {}", url.blue());
        }
        println!(
            "      {} points by {} | {} comments | {}",
            story.score,
            story.by.as_deref().unwrap_or("unknown"),
            story.descendants,
            format_time(story.time).dimmed()
        );
    }

    println!(
        "\n{} page {}/{} ({} total, {} per page)",
        "ℹ️ ".cyan(),
        page.page_number,
        page.total_pages.max(1),
        page.total_count,
        page.page_size
    );
}

/// 1-based position of the page's first story in the full list.
fn first_position(page: &Page<Story>) -> usize {
    page.page_number
        .saturating_sub(1)
        .saturating_mul(page.page_size)
        .saturating_add(1)
}

fn format_time(unix_seconds: i64) -> String {
    chrono::DateTime::from_timestamp(unix_seconds, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}
