//! Page parsing capability
//!
//! The crawler only needs one thing from a page: its words and its outbound
//! links. Parsers must be total for ordinary failures (unknown page,
//! unreachable host, unreadable content) and return an empty page instead of
//! an error. An `Err` is reserved for broken invariants and aborts the
//! crawl branch that hit it.

pub mod graph;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::models::PageContents;
use crate::profiler::{CapabilitySet, Operation, Profiled};

pub use graph::{SiteGraph, SiteGraphParser};

/// Turns a URL into the words and links found there
#[async_trait]
pub trait PageParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<PageContents>;
}

/// Capability table for [`PageParser`]
pub static PAGE_PARSER: CapabilitySet = CapabilitySet::new(
    "PageParser",
    &[Operation::profiled(
        "parse",
        "parse(&str) -> Result<PageContents>",
    )],
);

#[async_trait]
impl<T: PageParser> PageParser for Profiled<T> {
    async fn parse(&self, url: &str) -> Result<PageContents> {
        self.intercept_async("parse", |parser| parser.parse(url))
            .await
    }
}

#[async_trait]
impl<P: PageParser + ?Sized> PageParser for Arc<P> {
    async fn parse(&self, url: &str) -> Result<PageContents> {
        (**self).parse(url).await
    }
}

#[async_trait]
impl<P: PageParser + ?Sized> PageParser for Box<P> {
    async fn parse(&self, url: &str) -> Result<PageContents> {
        (**self).parse(url).await
    }
}
