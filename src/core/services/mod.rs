//! Analysis services
//!
//! Pure orchestration logic that operates on domain models.
//! Repository access goes through the [`CommitSource`](crate::core::ports::CommitSource) port.
//!
//! - [`parser`] - Todo text to [`TodoScript`](crate::core::models::TodoScript)
//! - [`extractor`] - Commit resolution and dependency lookup
//! - [`cache`] - Per-commit compute-once map used by the extractor
//! - [`graph`] - Directed dependency graph with cycle detection
//! - [`verifier`] - Script order checks producing violations

pub mod cache;
pub mod extractor;
pub mod graph;
pub mod parser;
pub mod verifier;

pub use cache::DependencyCache;
pub use extractor::{Analysis, DependencyExtractor};
pub use graph::DependencyGraph;
pub use parser::parse;
pub use verifier::{Elimination, verify};
