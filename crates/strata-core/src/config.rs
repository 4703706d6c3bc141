//! Configuration file loading for strata.
//!
//! Reads `.strata/strata.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level strata configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrataConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Dependency graph service report, relative to the working directory.
    #[serde(default = "default_contracts")]
    pub contracts: PathBuf,
    /// Folders whose last segment is the root module of the files beneath them.
    #[serde(default)]
    pub target_folders: Vec<PathBuf>,
    #[serde(default)]
    pub exclude_folders: Vec<PathBuf>,
    /// Extra import roots, searched in order before target folders.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
    /// Sentinel directory whose next segment is a non-semantic grouping prefix.
    /// `null` disables the convention.
    #[serde(default = "default_convention_root")]
    pub convention_root: Option<String>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Names of the contracts to check. Empty checks every contract in the report.
    #[serde(default)]
    pub only_contracts: Vec<String>,
    /// Report parse time totals alongside the check result.
    #[serde(default)]
    pub show_timings: bool,
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_contracts() -> PathBuf {
    PathBuf::from(".strata/contracts.json")
}
fn default_convention_root() -> Option<String> {
    Some("domains".to_string())
}
fn default_extensions() -> Vec<String> {
    vec!["py".to_string(), "pyi".to_string()]
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            contracts: default_contracts(),
            target_folders: vec![],
            exclude_folders: vec![],
            search_paths: vec![],
            convention_root: default_convention_root(),
            ignore_patterns: vec![],
            extensions: default_extensions(),
            only_contracts: vec![],
            show_timings: false,
        }
    }
}

impl StrataConfig {
    /// Load configuration from `strata.json` inside the given strata directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(strata_dir: &Path) -> Self {
        let config_path = strata_dir.join("strata.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }
}
