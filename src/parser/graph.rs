//! Offline page parser backed by a site graph file
//!
//! A site graph describes every page up front, so crawls can run without any
//! network access:
//!
//! ```json
//! {
//!   "pages": {
//!     "http://example.com/": {
//!       "text": "Welcome to the example site",
//!       "links": ["/about", "http://example.com/blog"]
//!     }
//!   }
//! }
//! ```
//!
//! Relative links are resolved against the page URL. Text is split into
//! lowercase words on anything that is not a letter, digit or apostrophe.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

use super::PageParser;
use crate::crawler::url::normalize_url;
use crate::error::{Error, Result};
use crate::models::PageContents;
use crate::utils::{compile_full_match, matches_any};

/// One page of a site graph
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SitePage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub links: Vec<String>,
}

/// All pages of a site, keyed by URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteGraph {
    pub pages: HashMap<String, SitePage>,
}

impl SiteGraph {
    /// Load a site graph from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Add or replace a page
    pub fn insert(&mut self, url: &str, text: &str, links: &[&str]) {
        self.pages.insert(
            url.to_string(),
            SitePage {
                text: text.to_string(),
                links: links.iter().map(|l| l.to_string()).collect(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// [`PageParser`] that reads pages from a [`SiteGraph`]
#[derive(Debug, Clone)]
pub struct SiteGraphParser {
    pages: HashMap<String, SitePage>,
    ignored_words: Vec<Regex>,
    latency: Duration,
}

impl SiteGraphParser {
    pub fn new(graph: SiteGraph) -> Self {
        let pages = graph
            .pages
            .into_iter()
            .map(|(url, page)| (normalize_url(&url), page))
            .collect();
        Self {
            pages,
            ignored_words: Vec::new(),
            latency: Duration::ZERO,
        }
    }

    /// Drop words matching any of these full-match patterns
    pub fn with_ignored_words(mut self, patterns: &[String]) -> Result<Self> {
        self.ignored_words = compile_full_match(patterns)?;
        Ok(self)
    }

    /// Wait this long before answering each parse, like a slow fetch would
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn count_words(&self, text: &str) -> HashMap<String, u64> {
        let mut counts = HashMap::new();
        for word in tokenize(text) {
            if matches_any(&self.ignored_words, &word) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
        counts
    }
}

#[async_trait]
impl PageParser for SiteGraphParser {
    async fn parse(&self, url: &str) -> Result<PageContents> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let Some(page) = self.pages.get(&normalize_url(url)) else {
            tracing::debug!(url = %url, "Page not in site graph");
            return Ok(PageContents::empty());
        };

        let links = page
            .links
            .iter()
            .filter_map(|href| resolve_link(url, href))
            .collect();

        Ok(PageContents {
            word_counts: self.count_words(&page.text),
            links,
        })
    }
}

/// Lowercase words of `text`; apostrophes stay inside words
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Resolve `href` against `page_url`; anchors and non-navigational schemes are skipped
fn resolve_link(page_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    match Url::parse(page_url) {
        Ok(base) => base.join(href).ok().map(String::from),
        // Pages keyed by opaque names link to each other by name
        Err(_) => Some(href.to_string()),
    }
}
