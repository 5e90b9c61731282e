//! Set of URLs already claimed during one crawl

use dashmap::DashSet;

use super::url::normalize_url;

/// Concurrency-safe at-most-once claim on URLs
///
/// No `contains`: the only way in is [`try_visit`],
/// which tests and inserts in one step.
///
/// [`try_visit`]: VisitedSet::try_visit
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `url`; true iff this call inserted it
    pub fn try_visit(&self, url: &str) -> bool {
        self.urls.insert(normalize_url(url))
    }

    /// Number of distinct URLs claimed so far
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
