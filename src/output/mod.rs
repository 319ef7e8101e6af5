//! Terminal output for drafts and run reports
//!
//! This module renders what the operator sees: the generated draft before
//! confirmation and the per-platform report at the end of a run.

mod report;

pub use report::{print_draft, print_report, render_draft, render_report};
