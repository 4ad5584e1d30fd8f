//! rebase-lint - static checks for git interactive-rebase todo scripts
//!
//! Point your editor's compiler integration at
//! `rebase-lint verify-rebase-interactive <todo>` to see ordering problems
//! before the rebase runs.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    unsafe_code,
    unused_import_braces
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;
mod commands;

use std::process::ExitCode;

/// Exit code for failures that prevented verification
const FATAL: u8 = 2;

/// Main entry point for the rebase-lint CLI
fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(FATAL)
        },
    }
}
