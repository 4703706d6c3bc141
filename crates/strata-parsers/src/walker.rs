use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::module_path::relative_segments;
use crate::treesitter::detect_language;

/// Discovers analysable source files below a root, honouring `.gitignore`
/// and `.strataignore`.
pub struct FileWalker {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            extensions: vec!["py".to_string(), "pyi".to_string()],
        }
    }

    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.extensions = extensions.to_vec();
        self
    }

    /// Sorted paths of every file with a configured extension and a supported language.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut entries = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(".strataignore")
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable walk entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if !self.has_extension(&path) {
                continue;
            }
            if detect_language(&path).is_some() {
                entries.push(path);
            }
        }

        entries.sort();
        tracing::debug!(root = %self.root.display(), files = entries.len(), "walk complete");
        entries
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Decides which files take part in contract checking.
///
/// A file is accepted when it is not under an exclude folder, does not match
/// an ignore glob, and, if any target folders are configured, sits under one
/// of them. Folder prefixes are compared whole segments at a time.
pub struct FolderFilter {
    working_dir: PathBuf,
    targets: Vec<Vec<String>>,
    excludes: Vec<Vec<String>>,
    ignore: GlobSet,
}

impl FolderFilter {
    pub fn new(
        working_dir: &Path,
        target_folders: &[PathBuf],
        exclude_folders: &[PathBuf],
        ignore_patterns: &[String],
    ) -> Self {
        let segments = |folders: &[PathBuf]| -> Vec<Vec<String>> {
            folders
                .iter()
                .map(|f| relative_segments(f, working_dir))
                .filter(|s| !s.is_empty())
                .collect()
        };
        Self {
            working_dir: working_dir.to_path_buf(),
            targets: segments(target_folders),
            excludes: segments(exclude_folders),
            ignore: build_globset(ignore_patterns),
        }
    }

    pub fn accepts(&self, file: &Path) -> bool {
        let rel = relative_segments(file, &self.working_dir);
        if self.excludes.iter().any(|ex| rel.starts_with(ex)) {
            tracing::trace!(file = %file.display(), "excluded folder");
            return false;
        }
        if self.ignore.is_match(rel.join("/")) {
            tracing::trace!(file = %file.display(), "matches ignore pattern");
            return false;
        }
        self.targets.is_empty() || self.targets.iter().any(|t| rel.starts_with(t))
    }

    /// Keep only accepted files, preserving order.
    pub fn filter(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        files.into_iter().filter(|f| self.accepts(f)).collect()
    }
}

/// Invalid globs are dropped with a warning rather than failing the run.
fn build_globset(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid glob"),
        }
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to build ignore globs");
        GlobSet::empty()
    })
}
