//! URL filtering and normalization
//!
//! Ignored-URL patterns are full-match regular expressions tested against the
//! URL exactly as it was discovered. The visited set keys on the normalized
//! form so that `http://a.com` and `http://a.com/#top` count as one page.

use regex::Regex;
use url::Url;

use crate::utils::{compile_full_match, matches_any};

/// Ordered list of full-match patterns for URLs that must never be crawled
#[derive(Debug, Clone, Default)]
pub struct UrlFilter {
    patterns: Vec<Regex>,
}

impl UrlFilter {
    /// Compile `patterns`, each anchored at both ends
    pub fn new(patterns: &[String]) -> Result<Self, regex::Error> {
        Ok(Self {
            patterns: compile_full_match(patterns)?,
        })
    }

    /// Filter that lets every URL through
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// True when `url` matches any pattern
    pub fn is_ignored(&self, url: &str) -> bool {
        matches_any(&self.patterns, url)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Canonical form of `raw` used as the visited-set key
///
/// Absolute URLs are re-serialized by the `url` crate (lowercase scheme and
/// host, default path `/`) with the fragment removed. Anything that does not
/// parse is only trimmed.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.into()
        }
        Err(_) => trimmed.to_string(),
    }
}
