use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    about = "Pin broken import contracts to the import lines that break them"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log progress at info level
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log every resolution decision at debug level
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Report the import lines responsible for broken contracts
    Check {
        /// Files to check (empty = walk the working directory)
        files: Vec<PathBuf>,
        /// Contract report produced by the dependency graph service
        #[arg(long)]
        contracts: Option<PathBuf>,
        #[command(flatten)]
        resolution: ResolutionArgs,
        /// Comma-separated folders to leave out of the check
        #[arg(long, value_delimiter = ',')]
        exclude_folders: Vec<PathBuf>,
        /// Exit non-zero on any broken contract, even without a matching line
        #[arg(long)]
        strict: bool,
        /// Only check the named contract (repeatable)
        #[arg(long = "contract", value_name = "NAME")]
        only_contracts: Vec<String>,
        /// Report time spent parsing files
        #[arg(long)]
        show_timings: bool,
    },

    /// Show the module name each file resolves to
    Resolve {
        /// Files to resolve
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        resolution: ResolutionArgs,
    },

    /// Generate shell completion scripts
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags that override module path resolution settings from `.strata/strata.json`.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct ResolutionArgs {
    /// Comma-separated folders whose last segment names the root module
    #[arg(long, value_delimiter = ',')]
    pub target_folders: Vec<PathBuf>,
    /// Extra import root, searched before target folders (repeatable)
    #[arg(long = "search-path")]
    pub search_paths: Vec<PathBuf>,
    /// Leading directory whose next segment is a grouping prefix
    #[arg(long, conflicts_with = "no_convention_root")]
    pub convention_root: Option<String>,
    /// Disable the convention-root strategy
    #[arg(long)]
    pub no_convention_root: bool,
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
