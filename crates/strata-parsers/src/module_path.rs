//! File path to module name resolution.
//!
//! A file is resolved by trying a fixed sequence of strategies on its path,
//! rendered relative to the working directory with the source extension
//! removed. The first strategy that applies is authoritative: if its result is
//! not a valid module name the file is unresolvable, and later strategies are
//! never consulted.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use strata_core::config::StrataConfig;
use strata_core::types::ModuleId;

/// Read-only inputs to the resolver, fixed for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Directory every other path is made relative to.
    pub working_dir: PathBuf,
    /// Sentinel leading directory whose next segment is a grouping prefix.
    pub convention_root: Option<String>,
    /// Import roots (configured entries first, then environment entries).
    pub search_roots: Vec<PathBuf>,
    pub target_folders: Vec<PathBuf>,
    /// Extensions stripped from the final path segment, without the dot.
    pub extensions: Vec<String>,
}

impl ResolverConfig {
    pub fn new(working_dir: &Path) -> Self {
        let defaults = StrataConfig::default();
        Self {
            working_dir: working_dir.to_path_buf(),
            convention_root: defaults.convention_root,
            search_roots: vec![],
            target_folders: vec![],
            extensions: defaults.extensions,
        }
    }

    /// Build from a loaded config file. `extra_search_roots` (e.g. from
    /// `PYTHONPATH`) are searched after the configured ones.
    pub fn from_config(working_dir: &Path, config: &StrataConfig, extra_search_roots: &[PathBuf]) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            convention_root: config.convention_root.clone(),
            search_roots: config
                .search_paths
                .iter()
                .chain(extra_search_roots)
                .cloned()
                .collect(),
            target_folders: config.target_folders.clone(),
            extensions: config.extensions.clone(),
        }
    }
}

/// The strategy that produced a module name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStrategy {
    ConventionRoot,
    SearchRoot,
    TargetFolder,
    Fallback,
}

impl ResolveStrategy {
    /// Evaluation order. First applicable strategy wins.
    pub const CASCADE: [ResolveStrategy; 4] = [
        ResolveStrategy::ConventionRoot,
        ResolveStrategy::SearchRoot,
        ResolveStrategy::TargetFolder,
        ResolveStrategy::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveStrategy::ConventionRoot => "convention_root",
            ResolveStrategy::SearchRoot => "search_root",
            ResolveStrategy::TargetFolder => "target_folder",
            ResolveStrategy::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for ResolveStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts file paths into canonical module names.
#[derive(Debug, Clone)]
pub struct ModulePathResolver {
    working_dir: PathBuf,
    convention_root: Option<String>,
    search_roots: Vec<Vec<String>>,
    target_folders: Vec<Vec<String>>,
    extensions: Vec<String>,
}

impl ModulePathResolver {
    pub fn new(config: ResolverConfig) -> Self {
        let working_dir = config.working_dir;
        let normalize = |paths: Vec<PathBuf>| -> Vec<Vec<String>> {
            paths
                .iter()
                .map(|p| relative_segments(p, &working_dir))
                .filter(|segments| !segments.is_empty())
                .collect()
        };
        let search_roots = normalize(config.search_roots);
        let target_folders = normalize(config.target_folders);
        Self {
            convention_root: config.convention_root.filter(|s| !s.is_empty()),
            search_roots,
            target_folders,
            extensions: config.extensions,
            working_dir,
        }
    }

    /// Resolve a file to its module name, or `None` if it has no valid one.
    pub fn resolve(&self, file: &Path) -> Option<ModuleId> {
        self.resolve_with_strategy(file).map(|(module, _)| module)
    }

    /// Resolve a file and report which strategy decided the result.
    pub fn resolve_with_strategy(&self, file: &Path) -> Option<(ModuleId, ResolveStrategy)> {
        let rel = self.module_segments(file);
        for strategy in ResolveStrategy::CASCADE {
            let Some(parts) = self.apply(strategy, &rel) else {
                continue;
            };
            let module = if parts.is_empty() && strategy == ResolveStrategy::SearchRoot {
                Ok(ModuleId::root())
            } else {
                ModuleId::from_parts(parts)
            };
            return match module {
                Ok(module) => {
                    tracing::debug!(
                        file = %file.display(),
                        strategy = %strategy,
                        module = %module,
                        "resolved module path"
                    );
                    Some((module, strategy))
                }
                Err(e) => {
                    tracing::debug!(
                        file = %file.display(),
                        strategy = %strategy,
                        error = %e,
                        "module path is not a valid module name"
                    );
                    None
                }
            };
        }
        None
    }

    fn apply<'a>(&'a self, strategy: ResolveStrategy, rel: &'a [String]) -> Option<Vec<&'a str>> {
        match strategy {
            ResolveStrategy::ConventionRoot => self.convention_root_match(rel),
            ResolveStrategy::SearchRoot => self
                .search_roots
                .iter()
                .find(|root| rel.starts_with(root))
                .map(|root| as_strs(&rel[root.len()..])),
            ResolveStrategy::TargetFolder => self.target_folder_match(rel),
            ResolveStrategy::Fallback => Some(as_strs(rel)),
        }
    }

    /// `<root>/<group>/<rest...>` -> `rest`, when `rest` is non-empty.
    fn convention_root_match<'a>(&self, rel: &'a [String]) -> Option<Vec<&'a str>> {
        let sentinel = self.convention_root.as_deref()?;
        match rel {
            [first, _group, rest @ ..] if first == sentinel && !rest.is_empty() => Some(as_strs(rest)),
            _ => None,
        }
    }

    /// `<a>/<folder>/<rest...>` -> `folder.rest`.
    fn target_folder_match<'a>(&'a self, rel: &'a [String]) -> Option<Vec<&'a str>> {
        self.target_folders
            .iter()
            .find(|folder| rel.starts_with(folder))
            .and_then(|folder| {
                let root_module = folder.last()?;
                let mut parts = vec![root_module.as_str()];
                parts.extend(rel[folder.len()..].iter().map(String::as_str));
                Some(parts)
            })
    }

    /// Path segments relative to the working directory, extension removed.
    fn module_segments(&self, file: &Path) -> Vec<String> {
        let mut segments = relative_segments(file, &self.working_dir);
        if let Some(last) = segments.last_mut() {
            if let Some(stem) = strip_extension(last, &self.extensions) {
                *last = stem;
            }
        }
        segments
    }
}

fn as_strs(segments: &[String]) -> Vec<&str> {
    segments.iter().map(String::as_str).collect()
}

fn strip_extension(name: &str, extensions: &[String]) -> Option<String> {
    let path = Path::new(name);
    let ext = path.extension()?.to_str()?;
    if !extensions.iter().any(|e| e == ext) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

/// Lexically normalize `path` (joined onto `base` when relative) and express
/// it as segments relative to `base`. Paths outside `base` start with `..`.
/// Nothing is read from disk, so symlinks are not followed.
pub fn relative_segments(path: &Path, base: &Path) -> Vec<String> {
    let target = if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    };
    let base = normalize(base);

    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut rel: Vec<String> = std::iter::repeat("..".to_string())
        .take(base.len() - common)
        .collect();
    rel.extend(target[common..].iter().cloned());
    rel
}

fn normalize(path: &Path) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str().to_string_lossy().into_owned()),
            Component::RootDir => out.push(std::path::MAIN_SEPARATOR.to_string()),
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(last) if last != ".." && last != std::path::MAIN_SEPARATOR_STR => {
                    out.pop();
                }
                Some(_) if path.is_absolute() => {}
                _ => out.push("..".to_string()),
            },
            Component::Normal(s) => out.push(s.to_string_lossy().into_owned()),
        }
    }
    out
}
