//! Source-side services for strata: import extraction, file discovery, and
//! file-path to module-name resolution.

pub mod module_path;
pub mod parse;
pub mod python;
pub mod resolver;
pub mod treesitter;
pub mod walker;
