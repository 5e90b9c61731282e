//! wordcrawl - Parallel word-frequency crawler with a call-timing profiler
//!
//! Crawls a link graph from a set of seed URLs, bounded by depth and a
//! wall-clock deadline, and reports the most popular words on the pages it
//! visited. A separate profiler can wrap any capability (crawler, parser) and
//! time the operations it declares as profiled.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Crawl configuration loading and validation
//! - [`crawler`] - Parallel and sequential crawl engines
//! - [`parser`] - Page parsing capability and the offline site-graph parser
//! - [`profiler`] - Forwarding proxies, timing ledger and report
//! - [`models`] - Core data structures and types
//! - [`storage`] - Crawl result output
//! - [`utils`] - Clocks, pattern helpers and domain errors
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use wordcrawl::crawler::{CrawlSettings, ParallelCrawler, WebCrawler};
//! use wordcrawl::parser::{SiteGraph, SiteGraphParser};
//! use wordcrawl::utils::clock::SystemClock;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let graph = SiteGraph::from_file(std::path::Path::new("site.json"))?;
//!     let crawler = ParallelCrawler::new(
//!         Arc::new(SystemClock),
//!         Arc::new(SiteGraphParser::new(graph)),
//!         CrawlSettings::new(Duration::from_secs(5), 3).with_popular_word_count(10),
//!     );
//!     let result = crawler.crawl(&["http://example.com/".to_string()]).await?;
//!     println!("{} pages visited", result.urls_visited);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod profiler;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{CrawlConfig, CrawlerKind};
    pub use crate::crawler::{CrawlSettings, ParallelCrawler, SequentialCrawler, WebCrawler};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{CrawlResult, PageContents};
    pub use crate::parser::{PageParser, SiteGraph, SiteGraphParser};
    pub use crate::profiler::{Profiled, Profiler};
    pub use crate::utils::clock::{Clock, ManualClock, SystemClock};
}

// Direct re-exports for convenience
pub use models::{CrawlResult, PageContents};
