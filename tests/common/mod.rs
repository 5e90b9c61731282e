//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wordcrawl::error::{CrawlerError, Result};
use wordcrawl::models::PageContents;
use wordcrawl::parser::{PageParser, SiteGraph, SiteGraphParser};
use wordcrawl::utils::clock::ManualClock;

/// Build a site graph from `(url, text, links)` triples
pub fn site(pages: &[(&str, &str, &[&str])]) -> SiteGraph {
    let mut graph = SiteGraph::default();
    for (url, text, links) in pages {
        graph.insert(url, text, links);
    }
    graph
}

/// Manual clock frozen at a fixed instant
pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    ))
}

pub fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

/// Site-graph parser that remembers how often each URL was parsed
pub struct CountingParser {
    inner: SiteGraphParser,
    calls: Mutex<HashMap<String, usize>>,
}

impl CountingParser {
    pub fn new(graph: SiteGraph) -> Self {
        Self {
            inner: SiteGraphParser::new(graph),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_latency(graph: SiteGraph, latency: Duration) -> Self {
        Self {
            inner: SiteGraphParser::new(graph).with_latency(latency),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PageParser for CountingParser {
    async fn parse(&self, url: &str) -> Result<PageContents> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        self.inner.parse(url).await
    }
}

/// Site-graph parser that moves a manual clock forward on every parse
pub struct ClockAdvancingParser {
    pub inner: SiteGraphParser,
    pub clock: Arc<ManualClock>,
    pub step: Duration,
}

#[async_trait]
impl PageParser for ClockAdvancingParser {
    async fn parse(&self, url: &str) -> Result<PageContents> {
        self.clock.advance(self.step);
        self.inner.parse(url).await
    }
}

/// Site-graph parser that breaks its contract on one URL
pub struct FailingParser {
    pub inner: SiteGraphParser,
    pub fail_on: String,
}

#[async_trait]
impl PageParser for FailingParser {
    async fn parse(&self, url: &str) -> Result<PageContents> {
        if url == self.fail_on {
            return Err(CrawlerError::parser(url, "connection pool poisoned").into());
        }
        self.inner.parse(url).await
    }
}
