//! Error type shared by the parser, the extractor and the git adapter

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a verification run
#[derive(Debug, Error)]
pub enum Error {
    /// A todo line could not be parsed
    #[error("{line}:{column}: malformed todo line: {reason}")]
    MalformedTodoLine {
        /// 1-based line number
        line: usize,
        /// 1-based column of the offending token
        column: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The todo names a commit the repository does not contain
    #[error("line {line}: commit '{token}' cannot be resolved in the repository")]
    UnresolvedCommit {
        /// The commit token as written in the script
        token: String,
        /// 1-based line number of the first action naming it
        line: usize,
        /// 1-based column of the token
        column: usize,
    },

    /// The rebase base (`onto`) does not name a commit
    #[error("rebase base '{0}' cannot be resolved in the repository")]
    UnresolvedBase(String),

    /// No repository could be found for the script
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Error reported by libgit2
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// IO error while reading the script or rebase state
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A thread panicked while holding the dependency cache
    #[error("dependency cache lock poisoned")]
    CachePoisoned,
}
