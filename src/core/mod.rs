//! Core domain logic for rebase-lint
//!
//! This module contains pure analysis logic with no I/O dependencies.
//! Repository access is abstracted through the [`ports::CommitSource`] trait.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`TodoScript`, `Action`, `CommitId`, `Violation`)
//! - `services/` - Parsing, dependency extraction, graph and order verification
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
