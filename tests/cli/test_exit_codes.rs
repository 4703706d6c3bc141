// Tests for check exit codes: 0 clean, 1 violations, 2 errors.

use crate::common::{create_project, forbidden_contract, run_strata, write_contracts, write_file};

#[test]
fn test_exit_0_when_clean() {
    let (_dir, root) = create_project(&[("src/app/core.py", "import os\n")]);
    write_contracts(&root, vec![]);

    let output = run_strata(&root, &["check", "--search-path", "src"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_exit_1_on_violation() {
    let (_dir, root) = create_project(&[("src/app/core.py", "import app.web\n")]);
    write_contracts(
        &root,
        vec![forbidden_contract("core/web", &["app.core"], &["app.web"], &[])],
    );

    let output = run_strata(&root, &["check", "--search-path", "src"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
/// A broken contract with no matching line passes unless `--strict` is set.
fn test_strict_fails_on_unattributed_broken_contract() {
    let (_dir, root) = create_project(&[("src/app/core.py", "import os\n")]);
    write_contracts(
        &root,
        vec![forbidden_contract("core/web", &["app.core"], &["app.web"], &[])],
    );

    let relaxed = run_strata(&root, &["check", "--search-path", "src"]);
    assert_eq!(relaxed.status.code(), Some(0));

    let strict = run_strata(&root, &["check", "--search-path", "src", "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn test_exit_2_on_missing_contract_report() {
    let (_dir, root) = create_project(&[("src/app/core.py", "import os\n")]);

    let output = run_strata(&root, &["check"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E9002[import-contract-error]"), "stderr: {stderr}");
}

#[test]
fn test_missing_contract_report_json_error_on_stdout() {
    let (_dir, root) = create_project(&[("src/app/core.py", "import os\n")]);

    let output = run_strata(&root, &["check", "--json"]);
    assert_eq!(output.status.code(), Some(2));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["command"], "check");
    assert_eq!(json["error"]["code"], "E9002");
    assert_eq!(json["error"]["symbol"], "import-contract-error");
    assert!(json["error"]["message"].is_string());
}

#[test]
fn test_exit_2_on_malformed_contract_report() {
    let (_dir, root) = create_project(&[("src/app/core.py", "import os\n")]);
    write_file(&root, "report.json", "not json");

    let output = run_strata(&root, &["check", "--contracts", "report.json"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_exit_2_on_conflicting_flags() {
    let (_dir, root) = create_project(&[]);
    let output = run_strata(
        &root,
        &["resolve", "--convention-root", "x", "--no-convention-root", "a.py"],
    );
    assert_eq!(output.status.code(), Some(2));
}
