// Tests that JSON check output keeps a stable, machine-readable shape.

use std::path::PathBuf;

use serde_json::Value;
use strata_enforce::types::CheckResult;
use strata_output::json::JsonFormatter;
use strata_output::OutputFormatter;

use crate::common::{check_project, create_project, forbidden_contract, write_contracts};

fn violating_project() -> (tempfile::TempDir, PathBuf) {
    let (dir, root) = create_project(&[(
        "src/app/core.py",
        "import os\nfrom app.web.views import render\nfrom .. import nowhere\n",
    )]);
    write_contracts(
        &root,
        vec![forbidden_contract("core/web", &["app.core"], &["app.web"], &[])],
    );
    (dir, root)
}

fn check_json(root: &std::path::Path) -> Value {
    let result = check_project(root, &["src/app/core.py"], |c| {
        c.search_roots = vec![PathBuf::from("src")];
    });
    let out = JsonFormatter.format_check(&result);
    serde_json::from_str(&out).expect("check output must be valid JSON")
}

#[test]
fn test_top_level_fields() {
    let (_dir, root) = violating_project();
    let json = check_json(&root);

    assert_eq!(json["command"], "check");
    assert_eq!(json["status"], "violations");
    assert!(json["version"].is_string());
    for key in ["summary", "violations", "contracts", "skipped"] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn test_summary_fields() {
    let (_dir, root) = violating_project();
    let summary = &check_json(&root)["summary"];

    assert_eq!(summary["analyzed_files"], 1);
    assert_eq!(summary["edges_checked"], 2);
    assert_eq!(summary["edges_skipped"], 1);
    assert_eq!(summary["contracts_total"], 1);
    assert_eq!(summary["contracts_kept"], 0);
    assert_eq!(summary["contracts_broken"], 1);
    assert_eq!(summary["has_violations"], true);
}

#[test]
fn test_violation_fields() {
    let (_dir, root) = violating_project();
    let json = check_json(&root);
    let v = &json["violations"][0];

    assert_eq!(v["line"], 2);
    assert_eq!(v["contract"], "core/web");
    assert_eq!(v["code"], "E9003");
    assert_eq!(v["symbol"], "import-boundary-violation");
    assert_eq!(v["importer"], "app.core");
    assert_eq!(v["imported"], "app.web.views");
    assert_eq!(v["matched_by"], "forbidden_pattern");
    assert!(v["file"].as_str().unwrap().ends_with("core.py"));
    assert_eq!(
        v["message"],
        "Domain boundary violation: 'app.core' imports 'app.web.views' (violates core/web)"
    );
}

#[test]
fn test_skipped_entry_uses_snake_case_reason() {
    let (_dir, root) = violating_project();
    let json = check_json(&root);
    let skipped = &json["skipped"][0];

    assert_eq!(skipped["line"], 3);
    assert_eq!(skipped["import"], "..");
    assert_eq!(skipped["reason"], "unresolvable_import");
}

#[test]
fn test_json_output_deserializes_back() {
    let (_dir, root) = violating_project();
    let result = check_project(&root, &["src/app/core.py"], |c| {
        c.search_roots = vec![PathBuf::from("src")];
    });
    let parsed: CheckResult = serde_json::from_str(&JsonFormatter.format_check(&result)).unwrap();
    assert_eq!(parsed.violations, result.violations);
    assert_eq!(parsed.summary, result.summary);
}
