use std::path::PathBuf;

use strata_enforce::engine::resolve_files;
use strata_output::OutputFormatter;
use strata_parsers::module_path::{ModulePathResolver, ResolverConfig};

use super::{load_config, pythonpath_entries};
use crate::cli_args::ResolutionArgs;

/// Run `strata resolve`: print the module name of each file.
///
/// Exits 1 when any file has no valid module name.
pub fn run(formatter: &dyn OutputFormatter, files: Vec<PathBuf>, resolution: ResolutionArgs) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strata resolve: failed to get current directory: {}", e);
            return 2;
        }
    };

    let config = load_config(&cwd, &resolution);
    let resolver = ModulePathResolver::new(ResolverConfig::from_config(
        &cwd,
        &config,
        &pythonpath_entries(),
    ));

    let result = resolve_files(&resolver, &files);
    let output = formatter.format_resolve(&result);
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    if result.files.iter().any(|f| f.module.is_none()) {
        1
    } else {
        0
    }
}
