//! Text rendering of the profiling ledger

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::ledger::LedgerEntry;

/// RFC 1123 timestamp, e.g. `Tue, 3 Jun 2008 11:05:30 GMT`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%a, %-d %b %Y %H:%M:%S GMT").to_string()
}

/// `1m 2s 345ms`
pub fn format_duration(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{minutes}m {seconds}s {millis}ms")
}

/// One report line for a ledger entry, without the line break
pub fn format_entry(entry: &LedgerEntry) -> String {
    let unit = if entry.calls == 1 { "call" } else { "calls" };
    format!(
        "{} took {} ({} {unit})",
        entry.key,
        format_duration(entry.elapsed),
        entry.calls
    )
}

/// Full report: header, one line per entry, closing line break
pub fn render(run_started_at: DateTime<Utc>, entries: &[LedgerEntry]) -> String {
    let mut out = format!("Run at {}\n", format_timestamp(run_started_at));
    for entry in entries {
        out.push_str(&format_entry(entry));
        out.push('\n');
    }
    out.push('\n');
    out
}
