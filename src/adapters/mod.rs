//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `git/` - libgit2-backed [`CommitSource`](crate::core::ports::CommitSource),
//!   rebase state discovery and `Depends-on:` trailers

pub mod git;
