//! Word frequency aggregation and top-N ranking

use dashmap::DashMap;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Concurrency-safe additive map from word to occurrence count
#[derive(Debug, Default)]
pub struct WordCountAggregator {
    counts: DashMap<String, u64>,
}

impl WordCountAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the count for `word`, starting from zero
    pub fn merge(&self, word: &str, delta: u64) {
        // get_mut avoids allocating the key for words already present
        if let Some(mut count) = self.counts.get_mut(word) {
            *count += delta;
            return;
        }
        *self.counts.entry(word.to_string()).or_insert(0) += delta;
    }

    /// Merge every entry of one page's counts
    pub fn merge_all<'a>(&self, counts: impl IntoIterator<Item = (&'a String, &'a u64)>) {
        for (word, delta) in counts {
            self.merge(word, *delta);
        }
    }

    /// Point-in-time copy; only consistent once all writers have finished
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` highest ranked words, see [`rank_words`]
    pub fn top_words(&self, n: usize) -> Vec<(String, u64)> {
        if self.is_empty() {
            return Vec::new();
        }
        rank_words(self.snapshot(), n)
    }
}

/// Order by count descending, then word length descending, then alphabetically
fn compare_ranked(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
        .then_with(|| a.0.cmp(&b.0))
}

/// Keep the `n` highest ranked entries of `counts`
pub fn rank_words(counts: HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_unstable_by(compare_ranked);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn counts(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_merge_initializes_and_adds() {
        let agg = WordCountAggregator::new();
        agg.merge("rust", 2);
        agg.merge("rust", 3);
        agg.merge("go", 1);
        assert_eq!(agg.snapshot(), counts(&[("rust", 5), ("go", 1)]));
    }

    #[test]
    fn test_tie_broken_by_length() {
        let top = rank_words(counts(&[("a", 3), ("bee", 3), ("cat", 2)]), 2);
        assert_eq!(top, vec![("bee".to_string(), 3), ("a".to_string(), 3)]);
    }

    #[test]
    fn test_tie_broken_alphabetically() {
        let top = rank_words(counts(&[("dog", 1), ("cat", 1), ("ant", 1)]), 3);
        let words: Vec<_> = top.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["ant", "cat", "dog"]);
    }

    #[test]
    fn test_fewer_words_than_requested() {
        let top = rank_words(counts(&[("only", 1)]), 10);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_empty_aggregator_has_no_top_words() {
        assert!(WordCountAggregator::new().top_words(5).is_empty());
    }

    #[test]
    fn test_zero_requested() {
        let agg = WordCountAggregator::new();
        agg.merge("word", 1);
        assert!(agg.top_words(0).is_empty());
    }

    #[test]
    fn test_concurrent_merges_sum_exactly() {
        let agg = Arc::new(WordCountAggregator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let agg = Arc::clone(&agg);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        agg.merge("hot", 1);
                        agg.merge("warm", 2);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = agg.snapshot();
        assert_eq!(snapshot["hot"], 8000);
        assert_eq!(snapshot["warm"], 16000);
    }
}
