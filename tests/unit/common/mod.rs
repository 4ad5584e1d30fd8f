//! Shared test fixtures and helpers
//!
//! Scripts and analyses are built from short tokens that double as commit
//! identities, so no repository is needed.

use rebase_lint::core::models::{CommitId, Violation, ViolationKind};
use rebase_lint::core::services::{Analysis, DependencyGraph, parse, verify};

/// Analysis where each `(commit, dependency)` pair is an edge
pub fn analysis(edges: &[(&str, &str)]) -> Analysis {
    let mut graph = DependencyGraph::new();
    for (commit, dependency) in edges {
        graph.add_edge(CommitId::new(*commit), CommitId::new(*dependency));
    }
    Analysis::new(graph)
}

/// Parse and verify `text`
pub fn check(text: &str, analysis: &Analysis) -> Vec<Violation> {
    verify(&parse(text).expect("script parses"), analysis)
}

/// Kinds of the findings, in report order
pub fn kinds(violations: &[Violation]) -> Vec<ViolationKind> {
    violations.iter().map(|v| v.kind).collect()
}

/// `(line, column)` of the findings, in report order
pub fn positions(violations: &[Violation]) -> Vec<(usize, usize)> {
    violations
        .iter()
        .map(|v| (v.location.line, v.location.column))
        .collect()
}
