//! Console report over the crawl snapshot
//!
//! Renders the final counts, reference sets, resource listings and extrema
//! table once the crawl terminates.

use crate::crawler::{CrawlReport, ExternalRef};
use crate::menu::ResourceKind;

const RULE_WIDTH: usize = 100;

/// Prints the run report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}

/// Formats the run report as the console text
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    out.push_str("Directory and File Count Information:\n");
    out.push_str(&format!(
        "  Directories visited: {}\n",
        report.visited_count()
    ));

    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
    out.push_str(&format!(
        "External references: {}\n",
        report.external_refs.len()
    ));
    for (i, reference) in report.external_refs.iter().enumerate() {
        match reference {
            ExternalRef::Remote { host, port } => {
                out.push_str(&format!("  {}) Host: {}, Port: {}\n", i + 1, host, port))
            }
            ExternalRef::Malformed { line } => out.push_str(&format!(
                "  {}) Potentially malformed line: {}\n",
                i + 1,
                line
            )),
        }
    }

    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
    out.push_str(&format!(
        "Invalid references (error entries): {}\n",
        report.invalid_refs.len()
    ));
    for (i, reference) in report.invalid_refs.iter().enumerate() {
        out.push_str(&format!(
            "  {}) From {:?}: {}\n",
            i + 1,
            reference.origin,
            reference.detail
        ));
    }

    push_resource_listing(&mut out, report, ResourceKind::Text, "Text files");
    push_resource_listing(&mut out, report, ResourceKind::Binary, "Binary files");
    push_resource_listing(&mut out, report, ResourceKind::Image, "Image files");

    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    out.push_str("File Size Information:\n");
    for (label, entry) in report.extrema.entries() {
        match entry {
            Some(resource) => out.push_str(&format!(
                "  {}: {} (Size: {} bytes)\n",
                label,
                resource.url,
                resource.size.unwrap_or(0)
            )),
            None => out.push_str(&format!("  {}: None\n", label)),
        }
    }

    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));
    out.push_str("Informational Messages:\n");
    for message in &report.info_messages {
        out.push_str(&format!("  {:?}: {}\n", message.origin, message.text));
    }
    out.push_str(&format!("{}\n", "=".repeat(RULE_WIDTH)));

    out
}

fn push_resource_listing(
    out: &mut String,
    report: &CrawlReport,
    kind: ResourceKind,
    heading: &str,
) {
    let resources = report.resources_of_kind(kind);

    out.push_str(&format!("{}\n", "-".repeat(RULE_WIDTH)));
    out.push_str(&format!("{}: {}\n", heading, resources.len()));
    for (i, resource) in resources.iter().enumerate() {
        out.push_str(&format!("  {}) {}\n", i + 1, resource.url));
    }
}
