//! Crawler module for traversing a gopher service
//!
//! This module contains the core crawling logic, including:
//! - TCP transport with retry and deadline handling
//! - Bounded resource downloads
//! - Frontier/visited bookkeeping and the overall crawl loop

mod downloader;
mod engine;
mod transport;

pub use downloader::{download_resource, DownloadError};
pub use engine::{CrawlEngine, CrawlReport, ExternalRef, InfoMessage, InvalidRef, Resource};
pub use transport::{Transport, TransportError};

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl of the configured service
///
/// Seeds the frontier with the root selector, walks every reachable
/// directory exactly once, downloads each discovered file under the
/// configured bounds, and returns the final snapshot. Callers that need
/// cooperative cancellation construct a [`CrawlEngine`] directly and wire
/// its stop handle.
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The read-only snapshot of the finished run
/// * `Err(SpelunkError)` - The root menu was unreachable
pub async fn crawl(config: Config) -> Result<CrawlReport> {
    CrawlEngine::new(config).run().await
}
