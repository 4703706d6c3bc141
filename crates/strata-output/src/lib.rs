//! Output formatters for strata command results.
//!
//! - **JSON** (`--json`): machine-readable structured output
//! - **Human** (default): compiler-style diagnostics for terminals and CI logs

pub mod human;
pub mod json;

use strata_enforce::types::{CheckResult, ErrorReport, ResolveResult};

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_resolve(&self, result: &ResolveResult) -> String;
    /// Stdout rendering of a failed command. Diagnostics on stderr are the caller's job.
    fn format_error(&self, report: &ErrorReport) -> String;
}
