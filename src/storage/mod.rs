//! Crawl result output
//!
//! Results are written as pretty-printed JSON, words in rank order:
//!
//! ```json
//! {
//!   "wordCounts": {
//!     "crawler": 12,
//!     "rust": 9
//!   },
//!   "urlsVisited": 4
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::CrawlResult;

/// Writes one crawl result as JSON
pub struct ResultWriter<'a> {
    result: &'a CrawlResult,
}

impl<'a> ResultWriter<'a> {
    pub fn new(result: &'a CrawlResult) -> Self {
        Self { result }
    }

    /// Write to `path`, replacing any previous content
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        tracing::debug!(path = %path.display(), "Crawl result written");
        Ok(())
    }

    /// Write to an open sink and flush it
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self.result)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
