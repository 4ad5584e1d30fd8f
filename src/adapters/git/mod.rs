//! Git integration adapter
//!
//! Implements the [`CommitSource`] port on top of libgit2.
//!
//! - [`location`] - Finding the repository and rebase base for a script
//! - [`trailer`] - `Depends-on:` trailers in commit messages

pub mod location;
pub mod trailer;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use git2::{BlameOptions, Commit, DiffFile, DiffOptions, FileMode, Oid, Repository, Sort};

use crate::core::models::CommitId;
use crate::core::ports::CommitSource;
use crate::error::Error;

pub use location::RebaseLocation;

/// Default number of unchanged lines around a change that count as touched
pub const DEFAULT_CONTEXT_LINES: u32 = 3;

/// Which evidence counts as a dependency between two commits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencySignals {
    /// Context lines included around each change when diffing
    pub context_lines: u32,
    /// Depend on the commits that last touched the lines a commit changes
    pub content: bool,
    /// Depend on the commits named by `Depends-on:` trailers
    pub trailers: bool,
}

impl Default for DependencySignals {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            content: true,
            trailers: true,
        }
    }
}

/// Read-only commit history backed by a git repository
pub struct GitHistory {
    repo: Repository,
    onto: Option<Oid>,
    signals: DependencySignals,
}

impl std::fmt::Debug for GitHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHistory")
            .field("path", &self.repo.path())
            .field("onto", &self.onto)
            .field("signals", &self.signals)
            .finish()
    }
}

impl GitHistory {
    /// Open the repository a todo script belongs to
    ///
    /// Discovery starts at `location`, then falls back to the current
    /// directory. An explicit `onto` takes precedence over the base recorded
    /// by an in-progress rebase.
    pub fn open(
        location: &RebaseLocation,
        onto: Option<&str>,
        signals: DependencySignals,
    ) -> Result<Self, Error> {
        let repo = Repository::discover(&location.discover_from)
            .or_else(|err| {
                log::debug!("no repository at {}: {err}", location.discover_from.display());
                Repository::discover(".")
            })
            .map_err(|_| Error::NotARepository(location.discover_from.clone()))?;
        log::debug!("opened repository at {}", repo.path().display());

        let onto = match onto.or(location.onto.as_deref()) {
            Some(rev) => Some(
                repo.revparse_single(rev)
                    .and_then(|object| object.peel_to_commit())
                    .map(|commit| commit.id())
                    .map_err(|_| Error::UnresolvedBase(rev.to_string()))?,
            ),
            None => None,
        };

        Ok(Self::from_repository(repo, onto, signals))
    }

    /// Wrap an already opened repository
    #[must_use]
    pub const fn from_repository(repo: Repository, onto: Option<Oid>, signals: DependencySignals) -> Self {
        Self { repo, onto, signals }
    }

    fn find_commit(&self, commit: &CommitId) -> Result<Commit<'_>, Error> {
        let oid = Oid::from_str(commit.as_str())?;
        Ok(self.repo.find_commit(oid)?)
    }

    /// Commits that last touched the lines `commit` changes or sits next to
    fn content_dependencies(&self, commit: &Commit<'_>) -> Result<BTreeSet<CommitId>, Error> {
        let mut deps = BTreeSet::new();
        // Root commits only add lines
        let Ok(parent) = commit.parent(0) else {
            return Ok(deps);
        };

        let mut options = DiffOptions::new();
        options.context_lines(self.signals.context_lines);
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&parent.tree()?), Some(&commit.tree()?), Some(&mut options))?;

        let mut touched: BTreeMap<PathBuf, BTreeSet<usize>> = BTreeMap::new();
        diff.foreach(
            &mut |_, _| true,
            None,
            None,
            Some(&mut |delta, _, line| {
                if matches!(line.origin(), ' ' | '-')
                    && is_blob(&delta.old_file())
                    && is_blob(&delta.new_file())
                    && let (Some(path), Some(lineno)) = (delta.old_file().path(), line.old_lineno())
                    && let Ok(lineno) = usize::try_from(lineno)
                {
                    touched.entry(path.to_path_buf()).or_default().insert(lineno);
                }
                true
            }),
        )?;

        for (path, lines) in &touched {
            let (Some(&first), Some(&last)) = (lines.first(), lines.last()) else {
                continue;
            };
            let mut blame_options = BlameOptions::new();
            blame_options.newest_commit(parent.id()).min_line(first).max_line(last);
            if let Some(onto) = self.onto {
                blame_options.oldest_commit(onto);
            }

            let blame = self.repo.blame_file(path, Some(&mut blame_options))?;
            for &lineno in lines {
                if let Some(hunk) = blame.get_line(lineno)
                    && !hunk.is_boundary()
                {
                    deps.insert(CommitId::new(hunk.final_commit_id().to_string()));
                }
            }
        }

        Ok(deps)
    }

    /// Commits named by the message's `Depends-on:` trailers
    fn trailer_dependencies(&self, commit: &Commit<'_>) -> Result<BTreeSet<CommitId>, Error> {
        let message = String::from_utf8_lossy(commit.message_bytes());
        let mut deps = BTreeSet::new();

        for rev in trailer::depends_on(&message) {
            match self.resolve(&rev)? {
                Some(dependency) => {
                    deps.insert(dependency);
                },
                None => log::warn!(
                    "commit {}: Depends-on '{rev}' does not name a commit; ignoring it",
                    CommitId::new(commit.id().to_string()).short()
                ),
            }
        }

        Ok(deps)
    }
}

/// Whether a diff side is file content that blame can read
///
/// Gitlinks show up as a synthetic `Subproject commit` line; an added or
/// deleted side has no mode and does not disqualify the other.
fn is_blob(file: &DiffFile<'_>) -> bool {
    !matches!(file.mode(), FileMode::Commit | FileMode::Tree)
}

impl CommitSource for GitHistory {
    fn resolve(&self, token: &str) -> Result<Option<CommitId>, Error> {
        match self.repo.revparse_single(&format!("{token}^{{commit}}")) {
            Ok(object) => Ok(Some(CommitId::new(object.id().to_string()))),
            Err(err) => {
                log::debug!("cannot resolve '{token}': {}", err.message());
                Ok(None)
            },
        }
    }

    fn dependencies(&self, commit: &CommitId) -> Result<BTreeSet<CommitId>, Error> {
        let found = self.find_commit(commit)?;
        let mut deps = BTreeSet::new();

        if self.signals.content {
            deps.extend(self.content_dependencies(&found)?);
        }
        if self.signals.trailers {
            deps.extend(self.trailer_dependencies(&found)?);
        }
        deps.remove(commit);

        Ok(deps)
    }

    fn range(&self, listed: &BTreeSet<CommitId>) -> Result<Vec<CommitId>, Error> {
        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;

        for commit in listed {
            walk.push(Oid::from_str(commit.as_str())?)?;
        }

        if let Some(onto) = self.onto {
            walk.hide(onto)?;
        } else {
            // Without a recorded base, the range ends at the listed commits' parents
            for commit in listed {
                for parent in self.find_commit(commit)?.parent_ids() {
                    if !listed.contains(&CommitId::new(parent.to_string())) {
                        walk.hide(parent)?;
                    }
                }
            }
        }

        walk.map(|oid| oid.map(|oid| CommitId::new(oid.to_string())).map_err(Error::from))
            .collect()
    }
}
