//! Depth- and deadline-bounded word-frequency crawling
//!
//! This module implements the crawl engines. Both engines follow links from
//! a set of seed URLs, count the words of every page they claim, and reduce
//! the counts to the most popular words once the traversal is complete.
//!
//! - [`ParallelCrawler`] forks a task per link and joins the subtree
//! - [`SequentialCrawler`] walks the graph depth-first on one task

pub mod parallel;
pub mod sequential;
pub mod unit;
pub mod url;
pub mod visited;
pub mod word_counts;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{CrawlConfig, CrawlerKind};
use crate::error::Result;
use crate::models::CrawlResult;
use crate::parser::PageParser;
use crate::profiler::{CapabilitySet, Operation, Profiled, Profiler};
use crate::utils::clock::Clock;
use crate::utils::error::CrawlerError;

pub use parallel::ParallelCrawler;
pub use sequential::SequentialCrawler;
pub use unit::{CrawlContext, CrawlUnit};
pub use url::UrlFilter;
pub use visited::VisitedSet;
pub use word_counts::WordCountAggregator;

/// Crawls from seed URLs and reports the most popular words
#[async_trait]
pub trait WebCrawler: Send + Sync {
    /// Crawl starting from `starting_urls`
    async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult>;

    /// Most threads this crawler can make use of
    fn max_parallelism(&self) -> usize;
}

/// Capability table for [`WebCrawler`]
pub static WEB_CRAWLER: CapabilitySet = CapabilitySet::new(
    "WebCrawler",
    &[
        Operation::profiled("crawl", "crawl(&[String]) -> Result<CrawlResult>"),
        Operation::forwarded("max_parallelism", "max_parallelism() -> usize"),
    ],
);

#[async_trait]
impl<T: WebCrawler> WebCrawler for Profiled<T> {
    async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult> {
        self.intercept_async("crawl", |crawler| crawler.crawl(starting_urls))
            .await
    }

    fn max_parallelism(&self) -> usize {
        self.forward("max_parallelism", |crawler| crawler.max_parallelism())
    }
}

#[async_trait]
impl<C: WebCrawler + ?Sized> WebCrawler for Box<C> {
    async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult> {
        (**self).crawl(starting_urls).await
    }

    fn max_parallelism(&self) -> usize {
        (**self).max_parallelism()
    }
}

/// Limits that apply to one crawl invocation
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Wall-clock budget; no new page is started after it elapses
    pub timeout: Duration,
    /// Link hops allowed from a seed; a seed alone needs 1
    pub max_depth: usize,
    pub ignored_urls: UrlFilter,
    /// How many top words to keep in the result
    pub popular_word_count: usize,
    /// Requested worker width, capped at the hardware's parallelism
    pub parallelism: usize,
}

impl CrawlSettings {
    pub fn new(timeout: Duration, max_depth: usize) -> Self {
        Self {
            timeout,
            max_depth,
            ignored_urls: UrlFilter::allow_all(),
            popular_word_count: 0,
            parallelism: crate::utils::hardware_parallelism(),
        }
    }

    pub fn with_ignored_urls(mut self, ignored_urls: UrlFilter) -> Self {
        self.ignored_urls = ignored_urls;
        self
    }

    pub fn with_popular_word_count(mut self, count: usize) -> Self {
        self.popular_word_count = count;
        self
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Settings described by a loaded configuration
    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        Ok(Self::new(config.timeout(), config.max_depth)
            .with_ignored_urls(UrlFilter::new(&config.ignored_urls)?)
            .with_popular_word_count(config.popular_word_count)
            .with_parallelism(config.parallelism()))
    }
}

/// `now + timeout`, rejecting timeouts too large to represent
pub(crate) fn deadline_after(now: DateTime<Utc>, timeout: Duration) -> Result<DateTime<Utc>> {
    chrono::Duration::from_std(timeout)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| CrawlerError::TimeoutOutOfRange(timeout).into())
}

/// Build the configured crawler, wrapped by `profiler`
pub fn build_crawler(
    config: &CrawlConfig,
    clock: Arc<dyn Clock>,
    parser: Arc<dyn PageParser>,
    profiler: &Profiler,
) -> Result<Box<dyn WebCrawler>> {
    let settings = CrawlSettings::from_config(config)?;
    let crawler: Box<dyn WebCrawler> = match config.implementation() {
        CrawlerKind::Parallel => Box::new(
            profiler.wrap(&WEB_CRAWLER, ParallelCrawler::new(clock, parser, settings))?,
        ),
        CrawlerKind::Sequential => Box::new(
            profiler.wrap(&WEB_CRAWLER, SequentialCrawler::new(clock, parser, settings))?,
        ),
    };
    Ok(crawler)
}
