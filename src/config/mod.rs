//! Configuration management for the wordcrawl crawler
//!
//! This module handles loading and validating crawl configuration from JSON
//! or TOML files. Keys are camelCase in both formats:
//!
//! ```json
//! {
//!   "startPages": ["http://example.com/"],
//!   "ignoredUrls": [".*\\.pdf"],
//!   "ignoredWords": ["^.{1,3}$"],
//!   "parallelism": 4,
//!   "implementationOverride": "parallel",
//!   "maxDepth": 3,
//!   "timeoutSeconds": 5,
//!   "popularWordCount": 10,
//!   "profileOutputPath": "profile.txt",
//!   "resultPath": "result.json"
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::{compile_full_match, hardware_parallelism};

/// Which crawler implementation to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlerKind {
    #[default]
    Parallel,
    Sequential,
}

/// Crawl configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrawlConfig {
    /// Seed URLs
    pub start_pages: Vec<String>,

    /// Full-match patterns of URLs never to crawl
    pub ignored_urls: Vec<String>,

    /// Full-match patterns of words never to count
    pub ignored_words: Vec<String>,

    /// Requested worker width; hardware parallelism when absent
    pub parallelism: Option<usize>,

    /// Crawler implementation; parallel when absent
    pub implementation_override: Option<CrawlerKind>,

    /// Link hops allowed from a seed
    pub max_depth: usize,

    /// Wall-clock budget for one crawl in seconds
    pub timeout_seconds: u64,

    /// Number of top words to report
    pub popular_word_count: usize,

    /// Where to write the profiler report; stdout when absent
    pub profile_output_path: Option<PathBuf>,

    /// Where to write the crawl result; stdout when absent
    pub result_path: Option<PathBuf>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_pages: Vec::new(),
            ignored_urls: Vec::new(),
            ignored_words: Vec::new(),
            parallelism: None,
            implementation_override: None,
            max_depth: 0,
            timeout_seconds: 1,
            popular_word_count: 0,
            profile_output_path: None,
            result_path: None,
        }
    }
}

impl CrawlConfig {
    /// Load configuration from a file; `.toml` files are read as TOML, anything else as JSON
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))
        } else {
            Self::from_json_str(&content)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            anyhow::bail!("timeoutSeconds must be greater than 0");
        }

        if self.parallelism == Some(0) {
            anyhow::bail!("parallelism must be greater than 0");
        }

        compile_full_match(&self.ignored_urls).context("Invalid pattern in ignoredUrls")?;
        compile_full_match(&self.ignored_words).context("Invalid pattern in ignoredWords")?;

        Ok(())
    }

    /// Crawl timeout as Duration
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Requested parallelism, defaulting to the hardware's
    #[must_use]
    pub fn parallelism(&self) -> usize {
        self.parallelism.unwrap_or_else(hardware_parallelism)
    }

    #[must_use]
    pub fn implementation(&self) -> CrawlerKind {
        self.implementation_override.unwrap_or_default()
    }
}
