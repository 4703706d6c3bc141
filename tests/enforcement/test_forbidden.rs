// Tests for forbidden-contract attribution over real source files.

use std::path::PathBuf;

use crate::common::{check_project as check, create_project, forbidden_contract, write_contracts};

#[test]
/// Pattern fallback: source and forbidden globs both match, no evidence given.
fn test_forbidden_pattern_match_reports_line() {
    let (_dir, root) = create_project(&[(
        "src/domains/document/core.py",
        "import os\nfrom domains.billing.payments import charge\nfrom domains.shared.utils import fmt\n",
    )]);
    write_contracts(
        &root,
        vec![forbidden_contract(
            "Document must not use billing",
            &["domains.document"],
            &["domains.billing.*"],
            &[],
        )],
    );

    let result = check(&root, &["src/domains/document/core.py"], |c| {
        c.search_roots = vec![PathBuf::from("src")];
        c.convention_root = None;
    });

    assert_eq!(result.violations.len(), 1);
    let v = &result.violations[0];
    assert_eq!(v.line, 2);
    assert_eq!(v.code, "E9003");
    assert_eq!(v.importer, "domains.document.core");
    assert_eq!(v.imported, "domains.billing.payments");
    assert_eq!(v.matched_by, "forbidden_pattern");
}

#[test]
/// Evidence recorded at package granularity still pins the specific line.
fn test_forbidden_evidence_at_package_level() {
    let (_dir, root) = create_project(&[(
        "src/app/core/service.py",
        "from app.web import views\nfrom app.core import models\n",
    )]);
    write_contracts(
        &root,
        vec![forbidden_contract(
            "core does not import web",
            &["app.core"],
            &["app.web"],
            &[("app.core", "app.web")],
        )],
    );

    let result = check(&root, &["src/app/core/service.py"], |c| {
        c.search_roots = vec![PathBuf::from("src")];
    });

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].line, 1);
    assert_eq!(result.violations[0].matched_by, "evidence:containment");
}

#[test]
/// Relative imports are anchored before contracts are evaluated.
fn test_forbidden_relative_import() {
    let (_dir, root) = create_project(&[(
        "src/app/core/service.py",
        "from ..web.views import render\n",
    )]);
    write_contracts(
        &root,
        vec![forbidden_contract("core/web", &["app.core"], &["app.web"], &[])],
    );

    let result = check(&root, &["src/app/core/service.py"], |c| {
        c.search_roots = vec![PathBuf::from("src")];
    });

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].imported, "app.web.views");
}

#[test]
/// A contract the graph service reports as kept never yields violations.
fn test_kept_forbidden_contract_is_silent() {
    let (_dir, root) = create_project(&[("src/app/core.py", "import app.web\n")]);
    let mut contract = forbidden_contract("kept", &["app.core"], &["app.web"], &[]);
    contract["kept"] = serde_json::Value::Bool(true);
    write_contracts(&root, vec![contract]);

    let result = check(&root, &["src/app/core.py"], |c| {
        c.search_roots = vec![PathBuf::from("src")];
    });

    assert!(result.violations.is_empty());
    assert_eq!(result.status, "ok");
    assert_eq!(result.summary.contracts_kept, 1);
}

#[test]
/// A malformed pattern never matches but does not stop other contracts.
fn test_malformed_pattern_does_not_block_other_contracts() {
    let (_dir, root) = create_project(&[("src/app/core.py", "import app.web.views\n")]);
    write_contracts(
        &root,
        vec![
            forbidden_contract("broken pattern", &["app.co*"], &["app..web"], &[]),
            forbidden_contract("valid", &["app.core"], &["app.web.**"], &[]),
        ],
    );

    let result = check(&root, &["src/app/core.py"], |c| {
        c.search_roots = vec![PathBuf::from("src")];
    });

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].contract, "valid");
}
