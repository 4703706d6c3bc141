mod imports;
pub mod relative;

use std::path::Path;

use crate::resolver::{ImportExtractor, RawImport};
use crate::treesitter::{ParseError, TreeSitterParser};

pub use relative::resolve_relative_import;

/// Python import extractor backed by tree-sitter-python.
///
/// A fresh parser is created per file so the extractor can be shared freely
/// across rayon workers without locking.
#[derive(Debug, Default, Clone, Copy)]
pub struct PyImportExtractor;

impl PyImportExtractor {
    pub fn new() -> Self {
        PyImportExtractor
    }
}

impl ImportExtractor for PyImportExtractor {
    fn language(&self) -> &str {
        "python"
    }

    fn extract_imports(&self, path: &Path, content: &str) -> Result<Vec<RawImport>, ParseError> {
        let mut parser = TreeSitterParser::new();
        let tree = parser.parse("python", content.as_bytes())?;
        let imports = imports::collect_imports(tree.root_node(), content.as_bytes(), path);
        tracing::trace!(
            file = %path.display(),
            count = imports.len(),
            "extracted python imports"
        );
        Ok(imports)
    }
}
