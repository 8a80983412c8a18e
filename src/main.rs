//! mockapi CLI entry point
//!
//! Argument parsing, configuration and server startup all live in the
//! CLI module; this only reports failures and sets the exit code.

use mockapi::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
