//! Parallel crawl engine
//!
//! Every seed gets a root [`CrawlUnit`]; all roots run at the same time on
//! the tokio runtime and share one visited set and one word-count
//! aggregator. The engine returns once every subtree has finished.

use async_trait::async_trait;
use std::sync::Arc;

use super::unit::{join_group, CrawlContext, CrawlUnit};
use super::{deadline_after, CrawlSettings, WebCrawler};
use crate::error::Result;
use crate::models::CrawlResult;
use crate::parser::PageParser;
use crate::utils::clock::Clock;
use crate::utils::hardware_parallelism;
use tokio::task::JoinSet;

/// Crawler that fans out over links concurrently
pub struct ParallelCrawler {
    clock: Arc<dyn Clock>,
    parser: Arc<dyn PageParser>,
    settings: CrawlSettings,
    width: usize,
}

impl ParallelCrawler {
    /// Worker width is the requested parallelism capped at the hardware's
    pub fn new(clock: Arc<dyn Clock>, parser: Arc<dyn PageParser>, settings: CrawlSettings) -> Self {
        let width = settings.parallelism.clamp(1, hardware_parallelism());
        Self {
            clock,
            parser,
            settings,
            width,
        }
    }

    /// Number of pages that may be parsed at the same time
    pub fn width(&self) -> usize {
        self.width
    }
}

#[async_trait]
impl WebCrawler for ParallelCrawler {
    async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult> {
        let deadline = deadline_after(self.clock.now(), self.settings.timeout)?;
        let context = Arc::new(CrawlContext::new(
            deadline,
            Arc::clone(&self.clock),
            Arc::clone(&self.parser),
            self.settings.ignored_urls.clone(),
            self.width,
        ));

        tracing::info!(
            seeds = starting_urls.len(),
            max_depth = self.settings.max_depth,
            width = self.width,
            deadline = %deadline,
            "Starting parallel crawl"
        );

        let mut roots = JoinSet::new();
        for url in starting_urls {
            let unit = CrawlUnit::new(url.clone(), self.settings.max_depth, Arc::clone(&context));
            roots.spawn(unit.compute());
        }
        join_group(roots).await?;

        let result = CrawlResult::new(
            context.counts.top_words(self.settings.popular_word_count),
            context.visited.len(),
        );

        tracing::info!(
            urls_visited = result.urls_visited,
            words = result.word_counts.len(),
            "Parallel crawl finished"
        );

        Ok(result)
    }

    fn max_parallelism(&self) -> usize {
        hardware_parallelism()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SiteGraph, SiteGraphParser};
    use crate::utils::clock::SystemClock;
    use std::time::Duration;

    fn crawler(graph: SiteGraph, settings: CrawlSettings) -> ParallelCrawler {
        ParallelCrawler::new(
            Arc::new(SystemClock),
            Arc::new(SiteGraphParser::new(graph)),
            settings,
        )
    }

    #[test]
    fn test_width_is_clamped() {
        let settings = CrawlSettings::new(Duration::from_secs(1), 1).with_parallelism(usize::MAX);
        assert_eq!(crawler(SiteGraph::default(), settings).width(), hardware_parallelism());

        let settings = CrawlSettings::new(Duration::from_secs(1), 1).with_parallelism(0);
        assert_eq!(crawler(SiteGraph::default(), settings).width(), 1);
    }

    #[tokio::test]
    async fn test_cycle_terminates() {
        let mut graph = SiteGraph::default();
        graph.insert("http://a.test/", "alpha", &["http://b.test/"]);
        graph.insert("http://b.test/", "beta", &["http://a.test/"]);

        let settings = CrawlSettings::new(Duration::from_secs(10), 50).with_popular_word_count(5);
        let result = crawler(graph, settings)
            .crawl(&["http://a.test/".to_string()])
            .await
            .unwrap();

        assert_eq!(result.urls_visited, 2);
        assert_eq!(result.count_of("alpha"), Some(1));
        assert_eq!(result.count_of("beta"), Some(1));
    }

    #[tokio::test]
    async fn test_no_seeds() {
        let settings = CrawlSettings::new(Duration::from_secs(1), 3);
        let result = crawler(SiteGraph::default(), settings).crawl(&[]).await.unwrap();
        assert_eq!(result, CrawlResult::default());
    }
}
