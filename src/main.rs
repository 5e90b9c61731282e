use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordcrawl::config::CrawlConfig;
use wordcrawl::crawler::build_crawler;
use wordcrawl::parser::{PageParser, SiteGraph, SiteGraphParser, PAGE_PARSER};
use wordcrawl::profiler::Profiler;
use wordcrawl::storage::ResultWriter;
use wordcrawl::utils::clock::{Clock, SystemClock};

#[derive(Parser)]
#[command(
    name = "wordcrawl",
    version,
    about = "Crawl a site graph and report the most popular words",
    long_about = None
)]
struct Cli {
    /// Crawl configuration file (JSON, or TOML with a .toml extension)
    config: PathBuf,

    /// Site graph file describing the pages to crawl
    #[arg(short, long)]
    pages: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!(config = %cli.config.display(), pages = %cli.pages.display(), "wordcrawl starting");

    let config = CrawlConfig::from_file(&cli.config)?;
    config.validate().context("Invalid configuration")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let profiler = Profiler::new(Arc::clone(&clock));

    let graph = SiteGraph::from_file(&cli.pages)?;
    tracing::info!(pages = graph.len(), "Site graph loaded");

    let parser = SiteGraphParser::new(graph).with_ignored_words(&config.ignored_words)?;
    let parser: Arc<dyn PageParser> = Arc::new(profiler.wrap(&PAGE_PARSER, parser)?);

    let crawler = build_crawler(&config, Arc::clone(&clock), parser, &profiler)?;
    let result = crawler.crawl(&config.start_pages).await?;

    let writer = ResultWriter::new(&result);
    match &config.result_path {
        Some(path) => writer
            .write(path)
            .with_context(|| format!("Failed to write result to {}", path.display()))?,
        None => writer.write_to(&mut std::io::stdout().lock())?,
    }

    write_profile(&profiler, config.profile_output_path.as_deref());

    tracing::info!(urls_visited = result.urls_visited, "wordcrawl completed successfully");
    Ok(())
}

/// Profile output never fails the run; a write error is only logged
fn write_profile(profiler: &Profiler, path: Option<&Path>) {
    let written = match path {
        Some(path) => profiler.write_data(path),
        None => profiler
            .write_data_to(&mut std::io::stdout().lock())
            .map_err(Into::into),
    };

    if let Err(e) = written {
        tracing::warn!(error = %e, "Failed to write profile data");
    }
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("wordcrawl=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("wordcrawl=info,warn")
    };

    // Logs go to stderr so stdout carries only the result and the profile
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
