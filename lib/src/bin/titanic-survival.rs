//! titanic-survival CLI binary.

use std::process;

use clap::Parser;
use titanic_survival::cli::{execute_command, CliArgs};
use titanic_survival::logging;

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = logging::init(args.verbose, args.quiet) {
        eprintln!("Warning: {e}");
    }

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
