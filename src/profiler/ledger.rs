//! Shared ledger of accumulated call durations
//!
//! Every proxy created by one [`Profiler`](super::Profiler) records into the
//! same [`ProfilingState`]. Entries keep the order in which their operation
//! was first seen, so reports are stable across runs with the same call
//! sequence.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

/// Identity of a timed operation on a concrete target type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationKey {
    /// Concrete type name of the wrapped target
    pub target_type: &'static str,
    /// Operation signature from the capability table
    pub signature: &'static str,
}

impl OperationKey {
    pub const fn new(target_type: &'static str, signature: &'static str) -> Self {
        Self {
            target_type,
            signature,
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.target_type, self.signature)
    }
}

/// Totals for one operation at snapshot time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub key: OperationKey,
    /// Sum of every recorded call
    pub elapsed: Duration,
    /// Number of recorded calls
    pub calls: u64,
}

#[derive(Debug, Default)]
struct Entries {
    order: Vec<OperationKey>,
    totals: HashMap<OperationKey, (Duration, u64)>,
}

/// Concurrency-safe accumulator of per-operation durations
#[derive(Debug, Default)]
pub struct ProfilingState {
    entries: Mutex<Entries>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one call of `elapsed` to `key`, creating the entry on first use
    pub fn record(&self, key: OperationKey, elapsed: Duration) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let Entries { order, totals } = &mut *entries;
        let total = totals.entry(key).or_insert_with(|| {
            order.push(key);
            (Duration::ZERO, 0)
        });
        total.0 = total.0.saturating_add(elapsed);
        total.1 += 1;
    }

    /// Copy of all entries in first-seen order
    pub fn snapshot(&self) -> Vec<LedgerEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .order
            .iter()
            .map(|key| {
                let (elapsed, calls) = entries.totals[key];
                LedgerEntry {
                    key: *key,
                    elapsed,
                    calls,
                }
            })
            .collect()
    }

    /// Totals for a single operation, if it was ever recorded
    pub fn get(&self, key: &OperationKey) -> Option<LedgerEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.totals.get(key).map(|&(elapsed, calls)| LedgerEntry {
            key: *key,
            elapsed,
            calls,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .order
            .is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const PARSE: OperationKey = OperationKey::new("Graph", "parse(&str)");
    const CRAWL: OperationKey = OperationKey::new("Engine", "crawl(&[String])");

    #[test]
    fn test_record_accumulates() {
        let state = ProfilingState::new();
        state.record(PARSE, Duration::from_millis(10));
        state.record(PARSE, Duration::from_millis(15));

        let entry = state.get(&PARSE).unwrap();
        assert_eq!(entry.elapsed, Duration::from_millis(25));
        assert_eq!(entry.calls, 2);
    }

    #[test]
    fn test_snapshot_keeps_first_seen_order() {
        let state = ProfilingState::new();
        state.record(CRAWL, Duration::from_millis(1));
        state.record(PARSE, Duration::from_millis(1));
        state.record(CRAWL, Duration::from_millis(1));

        let keys: Vec<_> = state.snapshot().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![CRAWL, PARSE]);
    }

    #[test]
    fn test_concurrent_records_are_not_lost() {
        let state = Arc::new(ProfilingState::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        state.record(PARSE, Duration::from_micros(1));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let entry = state.get(&PARSE).unwrap();
        assert_eq!(entry.calls, 8000);
        assert_eq!(entry.elapsed, Duration::from_micros(8000));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(PARSE.to_string(), "Graph#parse(&str)");
    }
}
