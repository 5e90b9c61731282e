//! Single-task crawler
//!
//! Walks the link graph depth-first on the calling task. Same settings,
//! same skip rules and same result shape as the parallel engine; useful as a
//! baseline when profiling.

use async_trait::async_trait;
use std::sync::Arc;

use super::unit::CrawlContext;
use super::{deadline_after, CrawlSettings, WebCrawler};
use crate::error::Result;
use crate::models::CrawlResult;
use crate::parser::PageParser;
use crate::utils::clock::Clock;

pub struct SequentialCrawler {
    clock: Arc<dyn Clock>,
    parser: Arc<dyn PageParser>,
    settings: CrawlSettings,
}

impl SequentialCrawler {
    pub fn new(clock: Arc<dyn Clock>, parser: Arc<dyn PageParser>, settings: CrawlSettings) -> Self {
        Self {
            clock,
            parser,
            settings,
        }
    }
}

#[async_trait]
impl WebCrawler for SequentialCrawler {
    async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult> {
        let deadline = deadline_after(self.clock.now(), self.settings.timeout)?;
        let context = CrawlContext::new(
            deadline,
            Arc::clone(&self.clock),
            Arc::clone(&self.parser),
            self.settings.ignored_urls.clone(),
            1,
        );

        tracing::info!(
            seeds = starting_urls.len(),
            max_depth = self.settings.max_depth,
            deadline = %deadline,
            "Starting sequential crawl"
        );

        // Children are pushed in reverse so pages pop in depth-first document order
        let mut stack: Vec<(String, usize)> = starting_urls
            .iter()
            .rev()
            .map(|url| (url.clone(), self.settings.max_depth))
            .collect();

        while let Some((url, remaining_depth)) = stack.pop() {
            if !context.claim(&url, remaining_depth) {
                continue;
            }

            let page = context.parser.parse(&url).await?;
            context.counts.merge_all(&page.word_counts);
            tracing::debug!(url = %url, depth = remaining_depth, "Page crawled");

            stack.extend(
                page.links
                    .into_iter()
                    .rev()
                    .map(|link| (link, remaining_depth - 1)),
            );
        }

        let result = CrawlResult::new(
            context.counts.top_words(self.settings.popular_word_count),
            context.visited.len(),
        );

        tracing::info!(
            urls_visited = result.urls_visited,
            words = result.word_counts.len(),
            "Sequential crawl finished"
        );

        Ok(result)
    }

    fn max_parallelism(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SiteGraph, SiteGraphParser};
    use crate::utils::clock::SystemClock;
    use std::time::Duration;

    #[test]
    fn test_depth_limits_traversal() {
        let mut graph = SiteGraph::default();
        graph.insert("a", "one", &["b"]);
        graph.insert("b", "two", &["c"]);
        graph.insert("c", "three", &[]);

        let crawler = SequentialCrawler::new(
            Arc::new(SystemClock),
            Arc::new(SiteGraphParser::new(graph)),
            CrawlSettings::new(Duration::from_secs(10), 2).with_popular_word_count(10),
        );

        let result = tokio_test::block_on(crawler.crawl(&["a".to_string()])).unwrap();
        assert_eq!(result.urls_visited, 2);
        assert_eq!(result.count_of("three"), None);
        assert_eq!(crawler.max_parallelism(), 1);
    }
}
