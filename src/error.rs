//! Crate-wide error type
//!
//! Domain errors live in [`crate::utils::error`]; this module folds them,
//! together with I/O, JSON and pattern failures, into one [`Error`] so every
//! fallible operation can return [`Result`].
//!
//! Callers that need to react differently to profiler misuse and crawl
//! failures can match on [`Error::category`]:
//!
//! ```rust,ignore
//! use wordcrawl::error::{Error, ErrorCategory};
//!
//! fn exit_code(err: &Error) -> i32 {
//!     match err.category() {
//!         ErrorCategory::Config => 2,
//!         ErrorCategory::Instrumentation => 3,
//!         _ => 1,
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub use crate::utils::error::{CrawlerError, ProfilerError};

/// Coarse grouping of [`Error`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Traversal and page parsing
    Crawl,
    /// Proxy dispatch
    Instrumentation,
    /// Reading inputs and writing reports
    Io,
    /// Bad settings, patterns or capability tables
    Config,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Crawler error: {0}")]
    Crawler(#[from] CrawlerError),

    #[error("Profiler error: {0}")]
    Profiler(#[from] ProfilerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL or word pattern does not compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Wrap a failed read of `path`
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Crawler(_) => ErrorCategory::Crawl,
            Self::Profiler(ProfilerError::NoProfiledOperations { .. }) | Self::Pattern(_) => {
                ErrorCategory::Config
            }
            Self::Profiler(ProfilerError::UndeclaredOperation { .. }) => {
                ErrorCategory::Instrumentation
            }
            Self::Io(_) | Self::Read { .. } | Self::Json(_) => ErrorCategory::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
