//! BookFinder CLI - search a book catalog and keep a list of favorites

mod app;
mod commands;

use anyhow::Result;
use app::App;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse a 1-based page number
fn parse_page(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid page number", s))?;
    if n < 1 {
        Err("pages start at 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "bookfinder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Directory for saved favorites and the last search
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Base URL of the catalog's volumes API
    #[arg(long, global = true, value_name = "URL")]
    catalog_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and show the first page of results
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Go to a page of the last search
    Page {
        /// Page number (1-based)
        #[arg(value_parser = parse_page)]
        page: u32,
    },

    /// Go to the first page of the last search
    First,

    /// Go to the previous page of the last search
    Prev,

    /// Go to the next page of the last search
    Next,

    /// Go to the last reachable page of the last search
    Last,

    /// Show the last search without contacting the catalog
    Results,

    /// Forget the last search
    Clear,

    /// Show details for one book
    Show {
        /// Catalog volume id
        id: String,
    },

    /// Add a book to favorites, or remove it if it is already there
    Favorite {
        /// Catalog volume id
        id: String,
    },

    /// List favorite books
    Favorites,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bookfinder_cli=debug,bookfinder_core=debug"
    } else {
        "bookfinder_cli=info,bookfinder_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = App::from_env(cli.data_dir, cli.catalog_url, cli.json)?;

    match cli.command {
        Commands::Search { query } => commands::search(&app, &query.join(" ")).await,
        Commands::Page { page } => commands::navigate(&app, commands::Nav::To(page)).await,
        Commands::First => commands::navigate(&app, commands::Nav::First).await,
        Commands::Prev => commands::navigate(&app, commands::Nav::Previous).await,
        Commands::Next => commands::navigate(&app, commands::Nav::Next).await,
        Commands::Last => commands::navigate(&app, commands::Nav::Last).await,
        Commands::Results => commands::results(&app).await,
        Commands::Clear => commands::clear(&app).await,
        Commands::Show { id } => commands::show(&app, &id).await,
        Commands::Favorite { id } => commands::favorite(&app, &id).await,
        Commands::Favorites => commands::favorites(&app).await,
    }
}
