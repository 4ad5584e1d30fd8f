//! Violation model
//!
//! A violation is an expected finding, not a process error: the verifier
//! collects all of them and the reporter renders each once.

use serde::Serialize;

use super::{CommitId, Location, Severity};

/// Category of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A commit is scheduled before a commit it depends on
    Ordering,
    /// A retained commit depends on a dropped, absorbed or removed commit
    DroppedDependency,
    /// Retained commits depend on each other
    CyclicDependency,
    /// A squash/fixup has nothing earlier to fold into
    OrphanedSquash,
    /// The same commit is listed more than once
    DuplicateCommit,
    /// The verb is unknown; the line is not checked
    UnrecognizedVerb,
}

impl ViolationKind {
    /// Severity the finding is reported with
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Ordering | Self::DroppedDependency | Self::CyclicDependency | Self::OrphanedSquash => {
                Severity::Error
            },
            Self::DuplicateCommit | Self::UnrecognizedVerb => Severity::Warning,
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ordering => write!(f, "ordering"),
            Self::DroppedDependency => write!(f, "dropped-dependency"),
            Self::CyclicDependency => write!(f, "cyclic-dependency"),
            Self::OrphanedSquash => write!(f, "orphaned-squash"),
            Self::DuplicateCommit => write!(f, "duplicate-commit"),
            Self::UnrecognizedVerb => write!(f, "unrecognized-verb"),
        }
    }
}

/// A detected inconsistency between the script and the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Category
    pub kind: ViolationKind,
    /// Severity (derived from the kind)
    pub severity: Severity,
    /// Where to report it: the offending action's location
    pub location: Location,
    /// The offending commit, if the line names one
    pub commit: Option<CommitId>,
    /// Other commits involved (dependency, cycle members)
    pub related: Vec<CommitId>,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    /// Create a violation with the kind's default severity
    pub fn new(kind: ViolationKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            location,
            commit: None,
            related: Vec::new(),
            message: message.into(),
        }
    }

    /// Attach the offending commit
    #[must_use]
    pub fn with_commit(mut self, commit: CommitId) -> Self {
        self.commit = Some(commit);
        self
    }

    /// Attach related commits
    #[must_use]
    pub fn with_related(mut self, related: impl IntoIterator<Item = CommitId>) -> Self {
        self.related.extend(related);
        self
    }

    /// Whether this violation fails the run
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
