mod cli;
mod error;
mod exporter;
mod fmt;
mod logging;
mod models;
mod processor;
mod reports;
mod settings;
mod validators;

use clap::error::ErrorKind;
use clap::Parser;

use cli::args::{normalize_args, Cli, USAGE};
use error::ImportError;

fn main() {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            eprintln!("Error: Invalid arguments.");
            eprintln!("{USAGE}");
            return;
        }
    };

    logging::init_logging();

    match cli::import::run(&cli.input) {
        Ok(()) => {}
        // Nothing was processed; the run ends here without failing the process.
        Err(e) if e.is_configuration() => {
            eprintln!("Error: {e}");
            if matches!(e, ImportError::UnsupportedExtension(_)) {
                eprintln!("Error: The file must either be a .csv or .txt format.");
            }
            eprintln!("{USAGE}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
