//! rebase-lint - static checks for git interactive-rebase todo scripts
//!
//! Parses a `git-rebase-todo` script, derives which of the listed commits
//! depend on each other, and reports orderings the rebase cannot honour:
//! a commit scheduled before one of its dependencies, or a dependency that
//! the script drops or folds away. Findings are rendered as compiler-style
//! diagnostics so editors can show them inline.

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

/// Source revision this build was made from (baked in by `build.rs`)
pub const BUILD_REVISION: &str = env!("REBASE_LINT_REVISION");

pub mod adapters;
pub mod core;
pub mod error;
pub mod output;

pub use error::Error;
