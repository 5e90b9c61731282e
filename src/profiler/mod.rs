//! Call-timing profiler
//!
//! Wraps targets behind a forwarding proxy that times the operations their
//! capability table marks as profiled, and renders the accumulated ledger as
//! a text report.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wordcrawl::parser::{SiteGraphParser, PAGE_PARSER};
//! use wordcrawl::profiler::Profiler;
//! use wordcrawl::utils::clock::SystemClock;
//!
//! # fn example(parser: SiteGraphParser) -> wordcrawl::error::Result<()> {
//! let profiler = Profiler::new(Arc::new(SystemClock));
//! let parser = profiler.wrap(&PAGE_PARSER, parser)?;
//! // ... use `parser` wherever a PageParser is expected ...
//! profiler.write_data(std::path::Path::new("profile.txt"))?;
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod ledger;
pub mod proxy;
pub mod report;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::utils::clock::Clock;
use crate::utils::error::ProfilerError;

pub use capability::{CapabilitySet, Operation};
pub use ledger::{LedgerEntry, OperationKey, ProfilingState};
pub use proxy::Profiled;

/// Owns the shared ledger and hands out profiling proxies
#[derive(Debug)]
pub struct Profiler {
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
    started_at: DateTime<Utc>,
}

impl Profiler {
    /// Create a profiler; the run start is taken from `clock` now
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now();
        Self {
            clock,
            state: Arc::new(ProfilingState::new()),
            started_at,
        }
    }

    /// Wrap `target` so calls to its profiled operations are timed
    ///
    /// Fails when `capabilities` declares no profiled operation.
    pub fn wrap<T>(&self, capabilities: &'static CapabilitySet, target: T) -> Result<Profiled<T>> {
        if !capabilities.has_profiled() {
            return Err(ProfilerError::NoProfiledOperations {
                capability: capabilities.name,
            }
            .into());
        }

        tracing::debug!(
            capability = capabilities.name,
            target = std::any::type_name::<T>(),
            "Wrapping target for profiling"
        );

        Ok(Profiled::new(
            target,
            capabilities,
            Arc::clone(&self.clock),
            Arc::clone(&self.state),
        ))
    }

    /// The ledger shared by every proxy of this profiler
    pub fn state(&self) -> &Arc<ProfilingState> {
        &self.state
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current report text
    pub fn render(&self) -> String {
        report::render(self.started_at, &self.state.snapshot())
    }

    /// Write the report to `path`, replacing any previous content
    pub fn write_data(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_data_to(&mut writer)?;
        tracing::debug!(path = %path.display(), "Profile data written");
        Ok(())
    }

    /// Write the report to an already open sink and flush it
    pub fn write_data_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.render().as_bytes())?;
        writer.flush()
    }
}
