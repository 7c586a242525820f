//! moodledata-compare Binary
//!
//! Compares the file hashes in a moodledata directory listing with a database
//! export of the `files` table.

use clap::Parser;
use moodle_tools::cli::{logging_config, map_error, CompareCli, RunContext};
use moodle_tools::logging::init_logging;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = CompareCli::parse();

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config(&cli.common))) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("moodledata-compare starting");

    let context = match RunContext::new(cli.common.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.run_compare(&cli) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
