//! Recursive unit of parallel traversal work
//!
//! A [`CrawlUnit`] waits for a worker slot, claims one URL, parses it, then
//! forks one child unit per outbound link into a task group and waits for
//! the whole group. A unit is only finished once its entire subtree is
//! finished.

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::url::UrlFilter;
use super::visited::VisitedSet;
use super::word_counts::WordCountAggregator;
use crate::error::Result;
use crate::parser::PageParser;
use crate::utils::clock::Clock;
use crate::utils::error::CrawlerError;

/// State shared by every unit of one crawl invocation
pub struct CrawlContext {
    pub deadline: DateTime<Utc>,
    pub clock: Arc<dyn Clock>,
    pub parser: Arc<dyn PageParser>,
    pub ignored_urls: UrlFilter,
    pub visited: VisitedSet,
    pub counts: WordCountAggregator,
    /// Bounds how many units parse at the same time
    workers: Semaphore,
}

impl CrawlContext {
    pub fn new(
        deadline: DateTime<Utc>,
        clock: Arc<dyn Clock>,
        parser: Arc<dyn PageParser>,
        ignored_urls: UrlFilter,
        width: usize,
    ) -> Self {
        Self {
            deadline,
            clock,
            parser,
            ignored_urls,
            visited: VisitedSet::new(),
            counts: WordCountAggregator::new(),
            workers: Semaphore::new(width.max(1)),
        }
    }

    /// Decide whether `url` should be parsed now, claiming it if so
    ///
    /// Checks run in order: depth and deadline, ignored patterns, then the
    /// atomic claim in the visited set. Ignored URLs are never claimed.
    pub fn claim(&self, url: &str, remaining_depth: usize) -> bool {
        if remaining_depth == 0 {
            tracing::trace!(url = %url, "Depth exhausted");
            return false;
        }
        if self.clock.now() >= self.deadline {
            tracing::debug!(url = %url, "Deadline passed, skipping");
            return false;
        }
        if self.ignored_urls.is_ignored(url) {
            tracing::debug!(url = %url, "URL ignored");
            return false;
        }
        if !self.visited.try_visit(url) {
            tracing::trace!(url = %url, "Already visited");
            return false;
        }
        true
    }
}

/// One URL to crawl with the depth budget left for it
pub struct CrawlUnit {
    url: String,
    remaining_depth: usize,
    context: Arc<CrawlContext>,
}

impl CrawlUnit {
    pub fn new(url: impl Into<String>, remaining_depth: usize, context: Arc<CrawlContext>) -> Self {
        Self {
            url: url.into(),
            remaining_depth,
            context,
        }
    }

    fn child(&self, url: String) -> Self {
        Self {
            url,
            remaining_depth: self.remaining_depth - 1,
            context: Arc::clone(&self.context),
        }
    }

    /// Run this unit and its whole subtree
    ///
    /// Resolves to `true` when this unit parsed its page, `false` when it was
    /// skipped.
    pub fn compute(self) -> BoxFuture<'static, Result<bool>> {
        async move {
            let ctx = Arc::clone(&self.context);
            if self.remaining_depth == 0 {
                return Ok(false);
            }

            let page = {
                // Claim under the permit: the deadline is read when the unit starts
                let _permit = ctx
                    .workers
                    .acquire()
                    .await
                    .map_err(|e| CrawlerError::TaskFailed(e.to_string()))?;
                if !ctx.claim(&self.url, self.remaining_depth) {
                    return Ok(false);
                }
                ctx.parser.parse(&self.url).await.inspect_err(|e| {
                    tracing::warn!(url = %self.url, error = %e, "Page parser failed");
                })?
            };

            ctx.counts.merge_all(&page.word_counts);
            tracing::debug!(
                url = %self.url,
                depth = self.remaining_depth,
                words = page.word_counts.len(),
                links = page.links.len(),
                "Page crawled"
            );

            let mut children = JoinSet::new();
            for link in page.links {
                children.spawn(self.child(link).compute());
            }
            join_group(children).await?;

            Ok(true)
        }
        .boxed()
    }
}

/// Wait for every unit in `group`; returns how many of them did work
///
/// The first failure is returned immediately and dropping the group aborts
/// the units still running.
pub async fn join_group(mut group: JoinSet<Result<bool>>) -> Result<usize> {
    let mut worked = 0;
    while let Some(joined) = group.join_next().await {
        match joined {
            Ok(Ok(true)) => worked += 1,
            Ok(Ok(false)) => {}
            Ok(Err(e)) => return Err(e),
            Err(e) => return Err(CrawlerError::TaskFailed(e.to_string()).into()),
        }
    }
    Ok(worked)
}
