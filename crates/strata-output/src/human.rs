use std::collections::BTreeMap;

use crate::OutputFormatter;
use strata_enforce::types::{CheckResult, ErrorReport, ParseTimings, ResolveResult, ViolationRecord};

pub struct HumanFormatter;

fn format_violation_human(v: &ViolationRecord) -> String {
    format!(
        "error[{}]: {}\n  --> {}:{}\n   = {} ({})\n",
        v.code, v.message, v.file, v.line, v.symbol, v.matched_by,
    )
}

fn format_timings(t: &ParseTimings, files: u32) -> String {
    let mut line = format!(
        "parse time: {:.2} ms across {} file(s)",
        t.total_us as f64 / 1000.0,
        files
    );
    if let Some(slowest) = &t.slowest_file {
        line.push_str(&format!(", slowest {} ({:.2} ms)", slowest, t.max_us as f64 / 1000.0));
    }
    line.push('\n');
    line
}

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        let broken: Vec<_> = result.broken_contracts().collect();
        let timings = result
            .timings
            .as_ref()
            .map(|t| format_timings(t, result.summary.analyzed_files))
            .unwrap_or_default();
        if result.violations.is_empty() && broken.is_empty() {
            return timings; // clean run = empty stdout unless timings were asked for
        }

        let mut out = String::new();
        for v in &result.violations {
            out.push_str(&format_violation_human(v));
        }

        // Broken contracts the graph reported but no import line explained.
        let unattributed: Vec<_> = broken.iter().filter(|c| c.violations == 0).collect();
        if !unattributed.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("broken contracts with no matching import line:\n");
            for c in unattributed {
                out.push_str(&format!("  {} ({})\n", c.name, c.kind));
            }
        }

        out.push_str(&format!(
            "\n{} violation(s), {} of {} contract(s) broken, {} file(s) analyzed\n",
            result.violations.len(),
            result.summary.contracts_broken,
            result.summary.contracts_total,
            result.summary.analyzed_files,
        ));
        if !result.skipped.is_empty() {
            let mut by_reason: BTreeMap<&str, usize> = BTreeMap::new();
            for s in &result.skipped {
                *by_reason.entry(s.reason.as_str()).or_default() += 1;
            }
            let reasons: Vec<String> = by_reason
                .iter()
                .map(|(reason, n)| format!("{reason}: {n}"))
                .collect();
            out.push_str(&format!(
                "{} import(s) skipped ({})\n",
                result.skipped.len(),
                reasons.join(", ")
            ));
        }
        out.push_str(&timings);
        out
    }

    fn format_resolve(&self, result: &ResolveResult) -> String {
        let mut out = String::new();
        for f in &result.files {
            match (&f.module, &f.strategy) {
                (Some(module), Some(strategy)) if module.is_empty() => {
                    out.push_str(&format!("{} -> <package root> [{}]\n", f.file, strategy));
                }
                (Some(module), Some(strategy)) => {
                    out.push_str(&format!("{} -> {} [{}]\n", f.file, module, strategy));
                }
                _ => out.push_str(&format!("{} -> unresolvable\n", f.file)),
            }
        }
        out
    }

    fn format_error(&self, _report: &ErrorReport) -> String {
        String::new()
    }
}
