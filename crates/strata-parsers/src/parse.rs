//! Parallel import extraction over a batch of files.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;

use crate::resolver::{FileImports, ImportExtractor};

/// Read and parse every file in parallel. Results keep the input order;
/// files that cannot be read or parsed are skipped with a warning.
pub fn parse_files(files: &[PathBuf], extractor: &dyn ImportExtractor) -> Vec<FileImports> {
    files
        .par_iter()
        .filter_map(|path| {
            let content = match std::fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "failed to read file");
                    return None;
                }
            };
            let start = Instant::now();
            match extractor.extract_imports(path, &content) {
                Ok(imports) => Some(FileImports {
                    file_path: path.clone(),
                    imports,
                    parse_duration_us: start.elapsed().as_micros() as u64,
                }),
                Err(e) => {
                    tracing::warn!(
                        file = %path.display(),
                        language = extractor.language(),
                        error = %e,
                        "failed to parse file"
                    );
                    None
                }
            }
        })
        .collect()
}
