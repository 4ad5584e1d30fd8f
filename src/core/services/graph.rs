//! Dependency graph
//!
//! A general directed graph over commit identities. Edges point from a
//! commit to the commits it depends on. Cycles are representable: history
//! itself is acyclic, but declared dependencies need not be, and deciding
//! what a cycle means is the verifier's job.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::core::models::CommitId;

/// Directed "depends on" graph with forward and reverse adjacency
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    forward: BTreeMap<CommitId, BTreeSet<CommitId>>,
    reverse: BTreeMap<CommitId, BTreeSet<CommitId>>,
}

impl DependencyGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no edges (no-op if present)
    pub fn add_node(&mut self, commit: CommitId) {
        self.reverse.entry(commit.clone()).or_default();
        self.forward.entry(commit).or_default();
    }

    /// Record that `commit` depends on `dependency`
    ///
    /// Self-edges are rejected. Returns whether the edge was new.
    pub fn add_edge(&mut self, commit: CommitId, dependency: CommitId) -> bool {
        if commit == dependency {
            return false;
        }
        self.add_node(commit.clone());
        self.add_node(dependency.clone());
        self.reverse.entry(dependency.clone()).or_default().insert(commit.clone());
        self.forward.entry(commit).or_default().insert(dependency)
    }

    /// Commits `commit` depends on
    pub fn dependencies_of(&self, commit: &CommitId) -> impl Iterator<Item = &CommitId> {
        self.forward.get(commit).into_iter().flatten()
    }

    /// Commits that depend on `commit`
    pub fn dependents_of(&self, commit: &CommitId) -> impl Iterator<Item = &CommitId> {
        self.reverse.get(commit).into_iter().flatten()
    }

    /// Whether `commit` depends directly on `dependency`
    #[must_use]
    pub fn depends_on(&self, commit: &CommitId, dependency: &CommitId) -> bool {
        self.forward.get(commit).is_some_and(|deps| deps.contains(dependency))
    }

    /// All nodes, in identity order
    pub fn nodes(&self) -> impl Iterator<Item = &CommitId> {
        self.forward.keys()
    }

    /// All edges as `(commit, dependency)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (&CommitId, &CommitId)> {
        self.forward
            .iter()
            .flat_map(|(commit, deps)| deps.iter().map(move |dep| (commit, dep)))
    }

    /// Number of edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum()
    }

    /// Strongly connected components with two or more members
    ///
    /// Only nodes accepted by `include` (and edges between them) are
    /// considered. Iterative Tarjan; each component is sorted, and
    /// components are ordered by their smallest member.
    pub fn cycles(&self, include: impl Fn(&CommitId) -> bool) -> Vec<Vec<CommitId>> {
        let mut tarjan = Tarjan::default();

        for root in self.nodes().filter(|n| include(n)) {
            if tarjan.index.contains_key(root) {
                continue;
            }
            tarjan.visit(root);
            let mut work = vec![Frame {
                node: root,
                successors: self.successors(root, &include),
                cursor: 0,
            }];

            while let Some(frame) = work.last_mut() {
                let node = frame.node;
                if let Some(next) = frame.successors.get(frame.cursor).copied() {
                    frame.cursor += 1;
                    if let Some(&next_index) = tarjan.index.get(next) {
                        if tarjan.on_stack.contains(next) {
                            tarjan.lower(node, next_index);
                        }
                    } else {
                        tarjan.visit(next);
                        work.push(Frame {
                            node: next,
                            successors: self.successors(next, &include),
                            cursor: 0,
                        });
                    }
                } else {
                    work.pop();
                    if let Some(parent) = work.last() {
                        let low = tarjan.lowlink[node];
                        tarjan.lower(parent.node, low);
                    }
                    tarjan.close(node);
                }
            }
        }

        let mut components: Vec<Vec<CommitId>> = tarjan
            .components
            .into_iter()
            .filter(|c| c.len() > 1)
            .map(|c| {
                let mut owned: Vec<CommitId> = c.into_iter().cloned().collect();
                owned.sort();
                owned
            })
            .collect();
        components.sort();
        components
    }

    fn successors<'g>(&'g self, node: &CommitId, include: &impl Fn(&CommitId) -> bool) -> Vec<&'g CommitId> {
        self.forward
            .get(node)
            .into_iter()
            .flatten()
            .filter(|n| include(n))
            .collect()
    }
}

struct Frame<'g> {
    node: &'g CommitId,
    successors: Vec<&'g CommitId>,
    cursor: usize,
}

#[derive(Default)]
struct Tarjan<'g> {
    next_index: usize,
    index: HashMap<&'g CommitId, usize>,
    lowlink: HashMap<&'g CommitId, usize>,
    on_stack: HashSet<&'g CommitId>,
    stack: Vec<&'g CommitId>,
    components: Vec<Vec<&'g CommitId>>,
}

impl<'g> Tarjan<'g> {
    fn visit(&mut self, node: &'g CommitId) {
        self.index.insert(node, self.next_index);
        self.lowlink.insert(node, self.next_index);
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack.insert(node);
    }

    fn lower(&mut self, node: &'g CommitId, candidate: usize) {
        if let Some(low) = self.lowlink.get_mut(node) {
            *low = (*low).min(candidate);
        }
    }

    /// Pop a finished component rooted at `node`, if it is a root
    fn close(&mut self, node: &'g CommitId) {
        if self.lowlink.get(node) != self.index.get(node) {
            return;
        }
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack.remove(member);
            component.push(member);
            if member == node {
                break;
            }
        }
        self.components.push(component);
    }
}
