//! strata CLI: line-level enforcement of import contracts.
//!
//! Reads a contract report from a dependency graph service, parses the
//! project's Python imports, and reports which import statements break which
//! contracts. See `strata --help` for usage.

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};
use commands::check::CheckOptions;

/// Diagnostics go to stderr so stdout stays parseable.
/// Filter: --debug > --verbose > RUST_LOG > "warn".
fn init_tracing(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    let formatter: Box<dyn strata_output::OutputFormatter> = if cli.json {
        Box::new(strata_output::json::JsonFormatter)
    } else {
        Box::new(strata_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check {
            files,
            contracts,
            resolution,
            exclude_folders,
            strict,
            only_contracts,
            show_timings,
        } => commands::check::run(
            &*formatter,
            files,
            contracts,
            resolution,
            CheckOptions {
                exclude_folders,
                strict,
                only_contracts,
                show_timings,
            },
        ),
        Commands::Resolve { files, resolution } => {
            commands::resolve::run(&*formatter, files, resolution)
        }
        Commands::Completion { shell } => commands::completion::run(shell),
    };

    std::process::exit(exit_code);
}
