// Tests for the `strata resolve` command.

use serde_json::Value;

use crate::common::{create_project, run_strata};

#[test]
fn test_resolve_human() {
    let (_dir, root) = create_project(&[]);
    let output = run_strata(
        &root,
        &[
            "resolve",
            "--search-path",
            "src",
            "src/app/core.py",
            "domains/grp/billing/api.py",
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "src/app/core.py -> app.core [search_root]\ndomains/grp/billing/api.py -> billing.api [convention_root]\n"
    );
}

#[test]
fn test_resolve_json_reports_unresolvable() {
    let (_dir, root) = create_project(&[]);
    let output = run_strata(&root, &["resolve", "--json", "pkg/mod.py", "../outside.py"]);

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["command"], "resolve");
    assert_eq!(json["files"][0]["module"], "pkg.mod");
    assert_eq!(json["files"][0]["strategy"], "fallback");
    assert!(json["files"][1]["module"].is_null());
}

#[test]
fn test_resolve_without_convention_root() {
    let (_dir, root) = create_project(&[]);
    let output = run_strata(
        &root,
        &["resolve", "--no-convention-root", "domains/grp/billing/api.py"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "domains/grp/billing/api.py -> domains.grp.billing.api [fallback]\n");
}

#[test]
fn test_resolve_requires_files() {
    let (_dir, root) = create_project(&[]);
    let output = run_strata(&root, &["resolve"]);
    assert_eq!(output.status.code(), Some(2));
}
