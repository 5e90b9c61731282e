//! Error types for the crawler and the profiler
//!
//! This module defines the domain-specific error types used throughout the crate.

use thiserror::Error;

/// Errors raised while traversing the link graph
#[derive(Error, Debug)]
pub enum CrawlerError {
    /// The page parser broke its contract and failed instead of returning an empty page
    #[error("Page parser failed on {url}: {reason}")]
    Parser { url: String, reason: String },

    /// A crawl task panicked or was cancelled before finishing
    #[error("Crawl task failed: {0}")]
    TaskFailed(String),

    /// The configured timeout cannot be added to the current time
    #[error("Timeout out of range: {0:?}")]
    TimeoutOutOfRange(std::time::Duration),
}

impl CrawlerError {
    /// Build a parser error for `url`
    pub fn parser(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parser {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by the profiler's interception layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfilerError {
    /// The wrapped capability set has nothing to time
    #[error("{capability} declares no profiled operations")]
    NoProfiledOperations { capability: &'static str },

    /// A call was routed through the proxy for an operation the capability set does not declare
    #[error("{capability} has no operation named '{operation}'")]
    UndeclaredOperation {
        capability: &'static str,
        operation: &'static str,
    },
}
