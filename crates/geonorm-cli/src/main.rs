//! geonorm CLI.

use clap::Parser;

mod cli;
mod commands;
mod io;
mod logging;

use crate::cli::Cli;
use crate::commands::run;
use crate::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(report) => {
            println!("{report}");
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}
