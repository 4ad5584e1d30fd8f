//! Commit source port
//!
//! Read-only view of the repository the todo script refers to.

use std::collections::BTreeSet;

use crate::core::models::CommitId;
use crate::error::Error;

/// Repository abstraction used by the dependency extractor
///
/// Implementations must not modify the repository.
#[cfg_attr(test, mockall::automock)]
pub trait CommitSource {
    /// Resolve a (possibly abbreviated) commit token to a full identity
    ///
    /// Returns `Ok(None)` when the repository has no such commit.
    fn resolve(&self, token: &str) -> Result<Option<CommitId>, Error>;

    /// Commits `commit` structurally depends on
    ///
    /// May be expensive; callers are expected to memoize per identity.
    fn dependencies(&self, commit: &CommitId) -> Result<BTreeSet<CommitId>, Error>;

    /// Every commit being rebased, listed in the script or not
    fn range(&self, listed: &BTreeSet<CommitId>) -> Result<Vec<CommitId>, Error>;
}
