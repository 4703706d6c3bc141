use std::path::PathBuf;

use strata_core::contract::ContractSet;
use strata_enforce::engine::ResolutionEngine;
use strata_enforce::messages::MessageId;
use strata_enforce::types::ErrorReport;
use strata_output::OutputFormatter;
use strata_parsers::module_path::{ModulePathResolver, ResolverConfig};
use strata_parsers::parse::parse_files;
use strata_parsers::python::PyImportExtractor;
use strata_parsers::walker::{FileWalker, FolderFilter};

use super::{load_config, pythonpath_entries, relative_to};
use crate::cli_args::ResolutionArgs;

/// `check` flags that are not about module resolution.
#[derive(Debug, Default)]
pub struct CheckOptions {
    pub exclude_folders: Vec<PathBuf>,
    pub strict: bool,
    pub only_contracts: Vec<String>,
    pub show_timings: bool,
}

/// Run `strata check`: attribute broken contracts to import lines.
pub fn run(
    formatter: &dyn OutputFormatter,
    files: Vec<PathBuf>,
    contracts: Option<PathBuf>,
    resolution: ResolutionArgs,
    options: CheckOptions,
) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strata check: failed to get current directory: {}", e);
            return 2;
        }
    };

    let mut config = load_config(&cwd, &resolution);
    if !options.exclude_folders.is_empty() {
        config.exclude_folders = options.exclude_folders;
    }
    if !options.only_contracts.is_empty() {
        config.only_contracts = options.only_contracts;
    }
    config.show_timings |= options.show_timings;

    let contracts_path = cwd.join(contracts.as_ref().unwrap_or(&config.contracts));
    let contract_set = match ContractSet::load(&contracts_path) {
        Ok(set) => set,
        Err(e) => {
            let id = MessageId::ContractError;
            eprintln!("strata check: {}[{}]: {}", id.code(), id.symbol(), e);
            let output = formatter.format_error(&ErrorReport::new("check", id, e.to_string()));
            if !output.is_empty() {
                println!("{}", output);
            }
            return 2;
        }
    };
    tracing::info!(
        path = %contracts_path.display(),
        contracts = contract_set.len(),
        broken = contract_set.broken().count(),
        "loaded contract report"
    );

    let candidates: Vec<PathBuf> = if files.is_empty() {
        FileWalker::new(&cwd)
            .with_extensions(&config.extensions)
            .walk()
            .into_iter()
            .map(|path| relative_to(&cwd, path))
            .collect()
    } else {
        files
    };
    let filter = FolderFilter::new(
        &cwd,
        &config.target_folders,
        &config.exclude_folders,
        &config.ignore_patterns,
    );
    let targets = filter.filter(candidates);
    tracing::info!(files = targets.len(), "files selected for checking");

    let parsed = parse_files(&targets, &PyImportExtractor::new());

    let resolver = ModulePathResolver::new(ResolverConfig::from_config(
        &cwd,
        &config,
        &pythonpath_entries(),
    ));
    let mut engine = ResolutionEngine::new(resolver, contract_set)
        .with_target_folders(&config.target_folders)
        .with_only_contracts(&config.only_contracts)
        .with_timings(config.show_timings);
    let result = engine.run(&parsed);

    let output = formatter.format_check(&result);
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    if result.summary.has_violations || (options.strict && result.summary.contracts_broken > 0) {
        1
    } else {
        0
    }
}
