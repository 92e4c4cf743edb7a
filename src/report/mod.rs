//! Reporting over the crawl snapshot
//!
//! This module handles:
//! - Computing the smallest/largest resource extrema
//! - Printing the human-readable run report to stdout
//! - Writing the markdown summary file

mod extrema;
mod markdown;
mod stats;

pub use extrema::{compute_extrema, ExtremaTable};
pub use markdown::{format_markdown_report, write_markdown_report};
pub use stats::{format_report, print_report};
