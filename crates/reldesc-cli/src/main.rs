use clap::Parser;
use reldesc_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging(cli.log_file.as_deref()) {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = cli.run() {
        eprintln!("reldesc error: {:#}", err);
        std::process::exit(1);
    }
}
