use tldgen_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the log file is unavailable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Progress goes to stdout, so fatal errors do too.
    if let Err(err) = Cli::run_from_args() {
        println!("tldgen error: {:#}", err);
        std::process::exit(1);
    }
}
