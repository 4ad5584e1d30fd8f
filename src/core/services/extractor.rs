//! Dependency extraction
//!
//! Resolves every commit the script names, asks the [`CommitSource`] what
//! each one depends on, and assembles the [`DependencyGraph`]. Lookups are
//! memoized per identity, so a commit listed twice is analysed once.

use std::collections::{BTreeSet, HashMap};

use crate::core::models::{CommitId, TodoScript};
use crate::core::ports::CommitSource;
use crate::core::services::cache::DependencyCache;
use crate::core::services::graph::DependencyGraph;
use crate::error::Error;

/// Everything the order verifier needs to know about the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    identities: HashMap<String, CommitId>,
    graph: DependencyGraph,
    unlisted: BTreeSet<CommitId>,
}

impl Analysis {
    /// An analysis over `graph` where tokens are their own identities
    #[must_use]
    pub fn new(graph: DependencyGraph) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    /// Map a script token to a resolved identity
    #[must_use]
    pub fn with_identity(mut self, token: impl Into<String>, commit: CommitId) -> Self {
        self.identities.insert(token.into(), commit);
        self
    }

    /// Mark a commit as part of the rebase but missing from the script
    #[must_use]
    pub fn with_unlisted(mut self, commit: CommitId) -> Self {
        self.unlisted.insert(commit);
        self
    }

    /// Identity of a script token
    ///
    /// Tokens that were never resolved are compared verbatim.
    #[must_use]
    pub fn identity(&self, token: &str) -> CommitId {
        self.identities.get(token).cloned().unwrap_or_else(|| CommitId::new(token))
    }

    /// The dependency graph
    #[must_use]
    pub const fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Commits being rebased that no script line mentions
    #[must_use]
    pub const fn unlisted(&self) -> &BTreeSet<CommitId> {
        &self.unlisted
    }
}

/// Builds an [`Analysis`] for a script from a [`CommitSource`]
pub struct DependencyExtractor<'a, S: CommitSource + ?Sized> {
    source: &'a S,
    cache: DependencyCache,
}

impl<S: CommitSource + ?Sized> std::fmt::Debug for DependencyExtractor<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyExtractor")
            .field("cached", &format!("{} commit(s)", self.cache.len()))
            .finish_non_exhaustive()
    }
}

impl<'a, S: CommitSource + ?Sized> DependencyExtractor<'a, S> {
    /// Create an extractor reading from `source`
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            cache: DependencyCache::new(),
        }
    }

    /// Dependencies of one commit, computed at most once
    pub fn dependencies(&self, commit: &CommitId) -> Result<BTreeSet<CommitId>, Error> {
        self.cache.get_or_compute(commit, || {
            let deps = self.source.dependencies(commit)?;
            log::debug!("{} depends on {} commit(s)", commit.short(), deps.len());
            Ok(deps)
        })
    }

    /// Resolve the script's commits and build the dependency graph
    ///
    /// Fails with [`Error::UnresolvedCommit`] on the first commit the
    /// repository does not contain.
    pub fn extract(&self, script: &TodoScript) -> Result<Analysis, Error> {
        let mut analysis = Analysis::default();

        for (action, token) in script.commit_actions() {
            if analysis.identities.contains_key(token) {
                continue;
            }
            let commit = self.source.resolve(token)?.ok_or_else(|| Error::UnresolvedCommit {
                token: token.to_string(),
                line: action.location.line,
                column: action.location.column,
            })?;
            log::debug!("resolved {token} to {commit}");
            analysis.identities.insert(token.to_string(), commit);
        }

        let listed: BTreeSet<CommitId> = analysis.identities.values().cloned().collect();
        if listed.is_empty() {
            return Ok(analysis);
        }

        let mentioned = self.resolve_mentions(script, &mut analysis)?;
        let range = self.source.range(&listed)?;
        log::debug!("rebased range holds {} commit(s), {} listed", range.len(), listed.len());
        analysis.unlisted = range
            .into_iter()
            .filter(|c| !listed.contains(c) && !mentioned.contains(c))
            .collect();

        for commit in &listed {
            analysis.graph.add_node(commit.clone());
            for dependency in self.dependencies(commit)? {
                let in_scope = listed.contains(&dependency) || analysis.unlisted.contains(&dependency);
                if in_scope {
                    analysis.graph.add_edge(commit.clone(), dependency);
                }
            }
        }

        Ok(analysis)
    }

    /// Commits named on unrecognized lines
    ///
    /// They are neither kept nor deleted, so they must not count as unlisted.
    /// A token that does not resolve is ignored.
    fn resolve_mentions(&self, script: &TodoScript, analysis: &mut Analysis) -> Result<BTreeSet<CommitId>, Error> {
        let mut mentioned = BTreeSet::new();
        for (action, token) in script.unrecognized_mentions() {
            if let Some(commit) = analysis.identities.get(token) {
                mentioned.insert(commit.clone());
                continue;
            }
            match self.source.resolve(token)? {
                Some(commit) => {
                    log::debug!("line {} mentions {commit}", action.location.line);
                    analysis.identities.insert(token.to_string(), commit.clone());
                    mentioned.insert(commit);
                },
                None => log::debug!("line {}: '{token}' is not a commit", action.location.line),
            }
        }
        Ok(mentioned)
    }
}
