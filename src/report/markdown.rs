//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl run,
//! mirroring the console report in a form that can be committed or shared.

use crate::crawler::{CrawlReport, ExternalRef};
use crate::menu::ResourceKind;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of the run to the given path
pub fn write_markdown_report(report: &CrawlReport, output_path: &Path) -> std::io::Result<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Spelunk Crawl Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", report.finished_at.to_rfc3339()));
    let duration = (report.finished_at - report.started_at).num_seconds();
    md.push_str(&format!("- **Duration**: {} seconds\n\n", duration));

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Directories visited**: {}\n",
        report.visited_count()
    ));
    md.push_str(&format!(
        "- **Resources recorded**: {}\n",
        report.resources.len()
    ));
    md.push_str(&format!(
        "- **External references**: {}\n",
        report.external_refs.len()
    ));
    md.push_str(&format!(
        "- **Invalid references**: {}\n\n",
        report.invalid_refs.len()
    ));

    if !report.external_refs.is_empty() {
        md.push_str("## External References\n\n");
        for reference in &report.external_refs {
            match reference {
                ExternalRef::Remote { host, port } => {
                    md.push_str(&format!("- Host: `{}`, Port: `{}`\n", host, port))
                }
                ExternalRef::Malformed { line } => {
                    md.push_str(&format!("- Potentially malformed line: `{}`\n", line))
                }
            }
        }
        md.push('\n');
    }

    if !report.invalid_refs.is_empty() {
        md.push_str("## Invalid References\n\n");
        for reference in &report.invalid_refs {
            md.push_str(&format!(
                "- From `{}`: {}\n",
                reference.origin, reference.detail
            ));
        }
        md.push('\n');
    }

    push_resource_listing(&mut md, report, ResourceKind::Text, "Text Files");
    push_resource_listing(&mut md, report, ResourceKind::Binary, "Binary Files");
    push_resource_listing(&mut md, report, ResourceKind::Image, "Image Files");

    md.push_str("## File Size Information\n\n");
    md.push_str("| Category | Resource | Size (bytes) |\n");
    md.push_str("|----------|----------|--------------|\n");
    for (label, entry) in report.extrema.entries() {
        match entry {
            Some(resource) => md.push_str(&format!(
                "| {} | {} | {} |\n",
                label,
                resource.url,
                resource.size.unwrap_or(0)
            )),
            None => md.push_str(&format!("| {} | None | - |\n", label)),
        }
    }
    md.push('\n');

    if !report.info_messages.is_empty() {
        md.push_str("## Informational Messages\n\n");
        for message in &report.info_messages {
            md.push_str(&format!("- `{}`: {}\n", message.origin, message.text));
        }
        md.push('\n');
    }

    md
}

fn push_resource_listing(md: &mut String, report: &CrawlReport, kind: ResourceKind, heading: &str) {
    let resources = report.resources_of_kind(kind);
    if resources.is_empty() {
        return;
    }

    md.push_str(&format!("## {} ({})\n\n", heading, resources.len()));
    for resource in resources {
        match resource.size {
            Some(size) => md.push_str(&format!("- {} ({} bytes)\n", resource.url, size)),
            None => md.push_str(&format!("- {}\n", resource.url)),
        }
    }
    md.push('\n');
}
