use std::path::{Path, PathBuf};

use crate::treesitter::ParseError;

/// The abstraction every language-specific import extractor implements.
///
/// Implementors must be `Send + Sync` so they can be shared across rayon
/// parallel iterators.
pub trait ImportExtractor: Send + Sync {
    /// Returns the canonical language name (e.g. "python").
    fn language(&self) -> &str;

    /// Parse a single file and return every import statement it contains.
    fn extract_imports(&self, path: &Path, content: &str) -> Result<Vec<RawImport>, ParseError>;
}

/// An import statement as written, before any module resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    /// File containing the import.
    pub file_path: PathBuf,
    /// Line number (1-based).
    pub line: u32,
    /// Imported module without leading dots (`""` for `from . import x`).
    pub module: String,
    /// Relative-import level: number of leading dots, 0 for absolute imports.
    pub level: u32,
    /// Names brought into scope by a from-import (`*` for wildcard imports).
    pub names: Vec<String>,
}

impl RawImport {
    pub fn absolute(file_path: &Path, line: u32, module: &str) -> Self {
        Self {
            file_path: file_path.to_path_buf(),
            line,
            module: module.to_string(),
            level: 0,
            names: vec![],
        }
    }

    /// The import as it appears in source, e.g. `..utils`.
    pub fn display_name(&self) -> String {
        format!("{}{}", ".".repeat(self.level as usize), self.module)
    }
}

/// All imports found in one file.
#[derive(Debug, Clone)]
pub struct FileImports {
    /// File path as given to the parser.
    pub file_path: PathBuf,
    pub imports: Vec<RawImport>,
    /// Wall-clock microseconds spent parsing this file.
    pub parse_duration_us: u64,
}
