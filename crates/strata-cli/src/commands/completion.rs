use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli_args::Cli;

/// Run `strata completion <shell>`: write the completion script to stdout.
pub fn run(shell: Shell) -> i32 {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut stdout = std::io::stdout().lock();
    clap_complete::generate(shell, &mut cmd, name, &mut stdout);
    match stdout.flush() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("strata completion: failed to write script: {e}");
            2
        }
    }
}
