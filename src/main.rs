//! Quote-Ripple main entry point
//!
//! This is the command-line interface for the Quote-Ripple quotation harvester.

mod menu;

use anyhow::Context;
use clap::{Parser, Subcommand};
use quote_ripple::config::{load_or_default, validate_base_url, Config};
use quote_ripple::output::{
    generate_markdown_report, print_crawl_summary, print_report, print_sample,
    print_search_results,
};
use quote_ripple::storage::load_json;
use quote_ripple::Session;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Quote-Ripple: a polite quotation harvester
///
/// Quote-Ripple walks the pages of a quotes site, collects every quotation
/// with its author and tags, and lets you analyze, search and export them.
#[derive(Parser, Debug)]
#[command(name = "quote-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A polite quotation harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Action to run; the interactive menu when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the site and export the quotes as CSV and JSON
    Scrape {
        /// Maximum pages to scrape
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=20))]
        max_pages: Option<u32>,

        /// First page to crawl
        #[arg(long)]
        base_url: Option<String>,

        /// Pause between pages in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Directory for the exported files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the summary without writing files
        #[arg(long)]
        no_save: bool,
    },

    /// Show statistics for a saved JSON file
    Analyze {
        /// JSON file to read (defaults to the configured load file)
        file: Option<PathBuf>,

        /// Also write the report as markdown to this path
        #[arg(long)]
        markdown: Option<PathBuf>,
    },

    /// Print the first quotes of a saved JSON file
    Sample {
        /// JSON file to read (defaults to the configured load file)
        file: Option<PathBuf>,

        /// Number of quotes to show
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },

    /// Search a saved JSON file by text, author or tag
    Search {
        /// Case-insensitive search term
        #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
        term: String,

        /// JSON file to read (defaults to the configured load file)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Interactive menu
    Menu,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = &cli.config {
        tracing::info!("Configuration loaded from: {}", path.display());
    }

    match cli.command.unwrap_or(Command::Menu) {
        Command::Scrape {
            max_pages,
            base_url,
            delay_ms,
            output_dir,
            no_save,
        } => {
            let mut config = config;
            if let Some(base_url) = base_url {
                validate_base_url(&base_url)?;
                config.crawler.base_url = base_url;
            }
            if let Some(max_pages) = max_pages {
                config.crawler.max_pages = max_pages;
            }
            if let Some(delay_ms) = delay_ms {
                config.crawler.request_delay_ms = delay_ms;
            }
            if let Some(dir) = output_dir {
                config.output.directory = dir.display().to_string();
            }
            handle_scrape(&config, no_save).await
        }
        Command::Analyze { file, markdown } => {
            let session = open(&config, file.as_deref())?;
            let report = session.analyze();
            print_report(report.as_ref());
            if let (Some(path), Some(report)) = (markdown, report.as_ref()) {
                generate_markdown_report(report, &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("\nReport written to: {}", path.display());
            }
            Ok(())
        }
        Command::Sample { file, count } => {
            let session = open(&config, file.as_deref())?;
            print_sample(session.records(), count);
            Ok(())
        }
        Command::Search { term, file } => {
            let session = open(&config, file.as_deref())?;
            let matches = session.search(&term);
            print_search_results(&term, &matches);
            Ok(())
        }
        Command::Menu => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut menu = menu::Menu::new(stdin.lock(), stdout.lock(), &config);
            menu.run().await.context("Menu input/output failed")
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_ripple=info,warn"),
            1 => EnvFilter::new("quote_ripple=debug,info"),
            2 => EnvFilter::new("quote_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds a session from a saved JSON file
fn open(config: &Config, file: Option<&Path>) -> anyhow::Result<Session> {
    let path = file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.load_file));

    let records =
        load_json(&path).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(Session::with_records(records))
}

/// Handles the scrape command: crawl, summarize, export
async fn handle_scrape(config: &Config, no_save: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Scraping {} (max {} pages, {}ms between pages)",
        config.crawler.base_url,
        config.crawler.max_pages,
        config.crawler.request_delay_ms
    );

    let mut session = Session::new();
    let harvest = session
        .harvest(config, !no_save)
        .await
        .context("Scrape failed")?;

    print_crawl_summary(&harvest.summary);

    if session.is_empty() {
        println!("\nNo quotes were scraped. Please check your internet connection.");
        return Ok(());
    }

    let Some(files) = harvest.files else {
        return Ok(());
    };

    println!("\nFiles saved:");
    println!("   - {}", files.csv.display());
    println!("   - {}", files.json.display());

    Ok(())
}
