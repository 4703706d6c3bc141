use crate::OutputFormatter;
use strata_enforce::types::{CheckResult, ErrorReport, ResolveResult};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_resolve(&self, result: &ResolveResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_error(&self, report: &ErrorReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
}
