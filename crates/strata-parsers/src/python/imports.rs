//! Import extraction from a tree-sitter-python syntax tree.

use std::path::Path;

use tree_sitter::Node;

use crate::resolver::RawImport;
use crate::treesitter::node_text;

/// Collect every `import` / `from ... import` statement in the tree, including
/// statements nested inside functions, classes, and conditional blocks.
pub(super) fn collect_imports(root: Node<'_>, source: &[u8], file_path: &Path) -> Vec<RawImport> {
    let mut imports = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        match node.kind() {
            "import_statement" => {
                imports.extend(plain_imports(node, source, file_path));
                continue;
            }
            "import_from_statement" => {
                if let Some(imp) = from_import(node, source, file_path) {
                    imports.push(imp);
                }
                continue;
            }
            // `from __future__ import x` never names a project module
            "future_import_statement" => continue,
            _ => {}
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            stack.push(child);
        }
    }

    imports.sort_by_key(|imp| imp.line);
    imports
}

fn line_of(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// `import a.b, c as d` -> one import per module.
fn plain_imports(node: Node<'_>, source: &[u8], file_path: &Path) -> Vec<RawImport> {
    let line = line_of(node);
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|name| imported_name(name, source))
        .map(|module| RawImport::absolute(file_path, line, &module))
        .collect()
}

/// `from ..pkg.mod import x, y` -> a single import of `pkg.mod` at level 2.
fn from_import(node: Node<'_>, source: &[u8], file_path: &Path) -> Option<RawImport> {
    let module_node = node.child_by_field_name("module_name")?;
    let text = node_text(module_node, source).trim();
    let module = text.trim_start_matches('.');
    let level = (text.len() - module.len()) as u32;

    let mut names: Vec<String> = {
        let mut cursor = node.walk();
        node.children_by_field_name("name", &mut cursor)
            .filter_map(|name| imported_name(name, source))
            .collect()
    };
    let mut cursor = node.walk();
    if node
        .named_children(&mut cursor)
        .any(|child| child.kind() == "wildcard_import")
    {
        names.push("*".to_string());
    }

    Some(RawImport {
        file_path: file_path.to_path_buf(),
        line: line_of(node),
        module: module.trim().to_string(),
        level,
        names,
    })
}

/// The dotted name of a `dotted_name` or `aliased_import` node.
fn imported_name(node: Node<'_>, source: &[u8]) -> Option<String> {
    let target = match node.kind() {
        "aliased_import" => node.child_by_field_name("name")?,
        "dotted_name" => node,
        _ => return None,
    };
    let text: String = node_text(target, source)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    (!text.is_empty()).then_some(text)
}
