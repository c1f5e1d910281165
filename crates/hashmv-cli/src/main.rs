use hashmv_core::{logging, HashmvError};

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; a watcher gives us no terminal,
    // so stderr is only the fallback.
    let log_to_file = match logging::init_logging() {
        Ok(()) => true,
        Err(err) => {
            logging::init_logging_stderr();
            tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
            false
        }
    };

    if let Err(err) = Cli::run_from_args() {
        // With the stderr fallback the eprintln below is already the record.
        if log_to_file {
            tracing::error!("{:#}", err);
        }
        eprintln!("hashmv error: {:#}", err);
        let code = err
            .downcast_ref::<HashmvError>()
            .map_or(2, HashmvError::exit_code);
        std::process::exit(code);
    }
}
