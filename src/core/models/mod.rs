//! Domain models for rebase-lint
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`CommitId`] - Identity of a commit named by the script
//! - [`TodoScript`] - Parsed todo: actions plus comment/blank lines
//! - [`Severity`] - Whether a finding fails the run
//! - [`Violation`] - A detected ordering inconsistency

mod commit;
mod severity;
mod todo;
mod violation;

pub use commit::CommitId;
pub use severity::Severity;
pub use todo::{Action, Location, Role, TodoLine, TodoScript, Verb};
pub use violation::{Violation, ViolationKind};
