// Core data structures for the wordcrawl crawler

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// What a page parser found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContents {
    /// Word occurrences on the page
    pub word_counts: HashMap<String, u64>,
    /// Outbound links, in document order
    pub links: Vec<String>,
}

impl PageContents {
    /// A page with no words and no links
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.word_counts.is_empty() && self.links.is_empty()
    }
}

/// Final outcome of one crawl invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    /// Most popular words, highest ranked first
    pub word_counts: Vec<(String, u64)>,
    /// Distinct pages parsed
    pub urls_visited: usize,
}

impl CrawlResult {
    pub fn new(word_counts: Vec<(String, u64)>, urls_visited: usize) -> Self {
        Self {
            word_counts,
            urls_visited,
        }
    }

    /// Look up a word's count
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, c)| *c)
    }
}

/// Serializes word counts as a JSON object keeping rank order
struct RankedWords<'a>(&'a [(String, u64)]);

impl Serialize for RankedWords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &RankedWords(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}
