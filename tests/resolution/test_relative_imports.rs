// Tests for extracting Python imports and anchoring relative ones.

use std::path::Path;

use strata_core::types::ModuleId;
use strata_parsers::python::{resolve_relative_import, PyImportExtractor};
use strata_parsers::resolver::ImportExtractor;

fn m(s: &str) -> ModuleId {
    ModuleId::parse(s).unwrap()
}

#[test]
fn test_extracted_relative_imports_resolve_against_file_module() {
    let source = "\
from . import views
from .models import Invoice
from ..shared.money import Money
from ...outside import thing
";
    let imports = PyImportExtractor::new()
        .extract_imports(Path::new("billing/api/handlers.py"), source)
        .unwrap();
    let current = m("billing.api.handlers");

    let resolved: Vec<Option<String>> = imports
        .iter()
        .map(|imp| resolve_relative_import(&imp.module, imp.level, &current).map(|m| m.to_string()))
        .collect();

    assert_eq!(
        resolved,
        vec![
            Some("billing.api".to_string()),
            Some("billing.api.models".to_string()),
            Some("billing.shared.money".to_string()),
            None,
        ]
    );
}

#[test]
fn test_absolute_imports_are_unchanged() {
    let imports = PyImportExtractor::new()
        .extract_imports(Path::new("a.py"), "import domains.billing.payments as pay\n")
        .unwrap();
    assert_eq!(imports.len(), 1);
    assert_eq!(
        resolve_relative_import(&imports[0].module, imports[0].level, &m("document.core")),
        Some(m("domains.billing.payments"))
    );
}

#[test]
fn test_relative_import_in_top_level_module_is_unresolvable() {
    assert_eq!(resolve_relative_import("sibling", 1, &m("script")), None);
}

#[test]
fn test_imports_inside_try_blocks_and_functions() {
    let source = "\
try:
    import ujson as json
except ImportError:
    import json

def lazy():
    from billing.payments import charge
    return charge
";
    let imports = PyImportExtractor::new()
        .extract_imports(Path::new("a.py"), source)
        .unwrap();
    let found: Vec<(u32, &str)> = imports.iter().map(|i| (i.line, i.module.as_str())).collect();
    assert_eq!(found, vec![(2, "ujson"), (4, "json"), (7, "billing.payments")]);
}
