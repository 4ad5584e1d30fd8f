//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundary between the analysis core and the
//! repository holding the commits a todo script names.
//!
//! Implementations live in the `adapters` module.

mod commit_source;

pub use commit_source::CommitSource;
#[cfg(test)]
pub use commit_source::MockCommitSource;
