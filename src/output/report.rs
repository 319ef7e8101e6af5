//! Draft and publish report rendering

use crate::pipeline::Draft;
use crate::publisher::{display_id, PublishOutcome, PublishReport};
use std::fmt::Write;

/// Renders the draft for review
pub fn render_draft(draft: &Draft) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Draft: {} ===\n", draft.topic);
    let _ = writeln!(out, "Context pages: {}", draft.corpus.len());
    for url in draft.corpus.urls() {
        let _ = writeln!(out, "  - {}", url);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Generated caption:\n{}\n", draft.content.caption);
    let _ = writeln!(out, "Generated content:\n{}\n", draft.content.body);

    match &draft.image {
        Some(image) => {
            let _ = writeln!(out, "Image: {}", image.url);
        }
        None => {
            let _ = writeln!(out, "Image: none (image platforms will be skipped)");
        }
    }

    out
}

/// Renders per-platform outcomes
pub fn render_report(report: &PublishReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Publish Report ===\n");

    if report.is_empty() {
        let _ = writeln!(out, "No platforms selected");
        return out;
    }

    for (platform, outcome) in report.entries() {
        let line = match outcome {
            PublishOutcome::Published { id } => format!("✓ published (id: {})", display_id(id)),
            PublishOutcome::Scheduled { id, publish_at } => format!(
                "✓ scheduled for {} (id: {})",
                publish_at.format("%Y-%m-%d %H:%M UTC"),
                display_id(id)
            ),
            PublishOutcome::Skipped { reason } => format!("- skipped: {}", reason),
            PublishOutcome::Unsupported { reason } => format!("- {}", reason),
            PublishOutcome::Failed(e) => format!("✗ failed: {}", e),
        };
        let _ = writeln!(out, "  {:<10} {}", platform.to_string(), line);
    }

    let total = report.entries().len();
    let failed = report.failure_count();
    let _ = writeln!(out, "\n{} of {} platforms without errors", total - failed, total);

    out
}

/// Prints the draft to stdout
pub fn print_draft(draft: &Draft) {
    println!("{}", render_draft(draft));
}

/// Prints the report to stdout
pub fn print_report(report: &PublishReport) {
    println!("{}", render_report(report));
}
