pub mod check;
pub mod completion;
pub mod resolve;

use std::path::{Path, PathBuf};

use strata_core::config::StrataConfig;

use crate::cli_args::ResolutionArgs;

/// Load `.strata/strata.json` from the working directory and apply CLI overrides.
pub(crate) fn load_config(cwd: &Path, overrides: &ResolutionArgs) -> StrataConfig {
    let mut config = StrataConfig::load(&cwd.join(".strata"));
    apply_overrides(&mut config, overrides);
    config
}

fn apply_overrides(config: &mut StrataConfig, overrides: &ResolutionArgs) {
    if !overrides.target_folders.is_empty() {
        config.target_folders = overrides.target_folders.clone();
    }
    if !overrides.search_paths.is_empty() {
        config.search_paths = overrides.search_paths.clone();
    }
    if overrides.no_convention_root {
        config.convention_root = None;
    } else if let Some(root) = &overrides.convention_root {
        config.convention_root = Some(root.clone());
    }
}

/// Non-empty `PYTHONPATH` entries, in order.
pub(crate) fn pythonpath_entries() -> Vec<PathBuf> {
    std::env::var_os("PYTHONPATH")
        .map(|value| {
            std::env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Display paths relative to the working directory when they sit beneath it.
pub(crate) fn relative_to(cwd: &Path, path: PathBuf) -> PathBuf {
    match path.strip_prefix(cwd) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path,
    }
}
