//! Release packager - versioned installer bundle builder.
//!
//! This binary assembles the installer release: it stages the shell
//! commands, installation modes, system configuration and bootstrap script
//! into a versioned tree, rewrites version- and date-dependent text, and
//! produces the distributable zip archive.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match release_packager::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
