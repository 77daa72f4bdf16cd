//! # Diskledger CLI
//!
//! The binary is thin: everything lives in `cli/`, this file only calls
//! `cli::run()` and turns an error into an exit code. See the library docs
//! for the layering.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
