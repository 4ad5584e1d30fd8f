//! Order verification
//!
//! Walks the script against the dependency graph and reports:
//!
//! - ordering: a retained commit scheduled before a retained dependency
//! - dropped dependency: a retained commit depending on a dropped,
//!   squashed/fixed-up, or unlisted commit
//! - cyclic dependency: retained commits depending on each other, once per
//!   strongly connected component instead of once per edge
//! - orphaned squash, duplicate commit and unrecognized verb findings
//!
//! Commits named only by squash/fixup/drop are eliminated; their own
//! dependencies are not checked. Unrecognized verbs occupy an ordinal slot
//! but take no part in dependency checks.
//!
//! Violations come out sorted by line, then column.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::models::{Action, CommitId, Role, TodoScript, Verb, Violation, ViolationKind};
use crate::core::services::extractor::Analysis;

/// Why a commit does not survive the rebase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elimination {
    /// `drop`
    Dropped,
    /// `squash` into an earlier commit
    Squashed,
    /// `fixup` into an earlier commit
    FixedUp,
    /// Part of the rebase but deleted from the script
    Unlisted,
}

impl Elimination {
    const fn from_verb(verb: &Verb) -> Option<Self> {
        match verb {
            Verb::Drop => Some(Self::Dropped),
            Verb::Squash => Some(Self::Squashed),
            Verb::Fixup => Some(Self::FixedUp),
            _ => None,
        }
    }
}

impl fmt::Display for Elimination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dropped => write!(f, "dropped"),
            Self::Squashed => write!(f, "squashed into an earlier commit"),
            Self::FixedUp => write!(f, "fixed up into an earlier commit"),
            Self::Unlisted => write!(f, "removed from the todo list"),
        }
    }
}

/// A script action naming a commit, with its resolved identity
struct Occurrence<'s> {
    action: &'s Action,
    commit: CommitId,
}

/// Check a script against its dependency analysis
#[must_use]
pub fn verify(script: &TodoScript, analysis: &Analysis) -> Vec<Violation> {
    let occurrences: Vec<Occurrence<'_>> = script
        .commit_actions()
        .map(|(action, token)| Occurrence {
            action,
            commit: analysis.identity(token),
        })
        .collect();

    let mentioned: HashSet<CommitId> = script
        .unrecognized_mentions()
        .map(|(_, token)| analysis.identity(token))
        .collect();
    let schedule = Schedule::new(&occurrences, &mentioned, analysis);
    let mut violations = Vec::new();

    let cycles = analysis.graph().cycles(|commit| schedule.is_retained(commit));
    let mut cycle_of: HashMap<&CommitId, usize> = HashMap::new();
    for (index, members) in cycles.iter().enumerate() {
        for member in members {
            cycle_of.insert(member, index);
        }
        if let Some(violation) = cycle_violation(&occurrences, &schedule, members) {
            violations.push(violation);
        }
    }

    let mut first_seen: HashMap<&CommitId, usize> = HashMap::new();
    let mut has_base = false;
    let mut occurrences_iter = occurrences.iter().peekable();

    for action in script.actions() {
        let occurrence = occurrences_iter.next_if(|o| std::ptr::eq(o.action, action));

        let Some(occurrence) = occurrence else {
            if let Verb::Unrecognized(name) = &action.verb {
                violations.push(Violation::new(
                    ViolationKind::UnrecognizedVerb,
                    action.location,
                    format!("unrecognized command '{name}'; line not checked"),
                ));
            }
            has_base |= action.verb.produces_commit();
            continue;
        };

        let commit = &occurrence.commit;
        let label = schedule.label(commit);

        if let Some(&line) = first_seen.get(commit) {
            violations.push(
                Violation::new(
                    ViolationKind::DuplicateCommit,
                    action.location,
                    format!("commit {label} is already listed on line {line}"),
                )
                .with_commit(commit.clone()),
            );
        } else {
            first_seen.insert(commit, action.location.line);
        }

        match action.role() {
            Role::Absorb if !has_base => {
                violations.push(
                    Violation::new(
                        ViolationKind::OrphanedSquash,
                        action.location,
                        format!("cannot '{}' commit {label} without a previous commit", action.verb),
                    )
                    .with_commit(commit.clone()),
                );
            },
            Role::Retain => {
                check_dependencies(occurrence, &schedule, analysis, &cycle_of, &mut violations);
            },
            _ => {},
        }
        has_base |= action.verb.produces_commit();
    }

    violations.sort_by_key(|v| (v.location.line, v.location.column));
    violations
}

fn check_dependencies(
    occurrence: &Occurrence<'_>,
    schedule: &Schedule<'_>,
    analysis: &Analysis,
    cycle_of: &HashMap<&CommitId, usize>,
    violations: &mut Vec<Violation>,
) {
    let commit = &occurrence.commit;
    let label = schedule.label(commit);

    for dependency in analysis.graph().dependencies_of(commit) {
        let dep_label = schedule.label(dependency);

        if let Some(&position) = schedule.positions.get(dependency) {
            let same_cycle = cycle_of.get(commit).is_some_and(|c| cycle_of.get(dependency) == Some(c));
            if !same_cycle && position > occurrence.action.ordinal {
                violations.push(
                    Violation::new(
                        ViolationKind::Ordering,
                        occurrence.action.location,
                        format!("commit {label} is scheduled before its dependency {dep_label}"),
                    )
                    .with_commit(commit.clone())
                    .with_related([dependency.clone()]),
                );
            }
        } else if let Some(reason) = schedule.eliminated.get(dependency) {
            violations.push(
                Violation::new(
                    ViolationKind::DroppedDependency,
                    occurrence.action.location,
                    format!("commit {label} depends on {dep_label}, which is {reason}"),
                )
                .with_commit(commit.clone())
                .with_related([dependency.clone()]),
            );
        }
    }
}

fn cycle_violation(occurrences: &[Occurrence<'_>], schedule: &Schedule<'_>, members: &[CommitId]) -> Option<Violation> {
    let first = occurrences
        .iter()
        .find(|o| o.action.role() == Role::Retain && members.contains(&o.commit))?;

    let mut ordered: Vec<&CommitId> = members.iter().collect();
    ordered.sort_by_key(|m| schedule.positions.get(*m).copied().unwrap_or(usize::MAX));
    let labels: Vec<&str> = ordered.iter().map(|m| schedule.label(*m)).collect();

    Some(
        Violation::new(
            ViolationKind::CyclicDependency,
            first.action.location,
            format!("commits {} depend on each other (dependency cycle)", labels.join(", ")),
        )
        .with_commit(first.commit.clone())
        .with_related(members.iter().filter(|m| **m != first.commit).cloned()),
    )
}

/// Where each commit ends up after the rebase
struct Schedule<'a> {
    /// Ordinal of the last retaining action per commit
    positions: HashMap<&'a CommitId, usize>,
    /// Commits that do not survive, and why
    eliminated: HashMap<&'a CommitId, Elimination>,
    /// Token as first written in the script
    labels: HashMap<&'a CommitId, &'a str>,
}

impl<'a> Schedule<'a> {
    fn new(occurrences: &'a [Occurrence<'a>], mentioned: &HashSet<CommitId>, analysis: &'a Analysis) -> Self {
        let mut positions = HashMap::new();
        let mut labels = HashMap::new();

        for occurrence in occurrences {
            if let Some(token) = occurrence.action.commit.as_deref() {
                labels.entry(&occurrence.commit).or_insert(token);
            }
            if occurrence.action.role() == Role::Retain {
                positions.insert(&occurrence.commit, occurrence.action.ordinal);
            }
        }

        let mut eliminated = HashMap::new();
        for occurrence in occurrences {
            if positions.contains_key(&occurrence.commit) {
                continue;
            }
            if let Some(reason) = Elimination::from_verb(&occurrence.action.verb) {
                eliminated.entry(&occurrence.commit).or_insert(reason);
            }
        }
        // A commit on an unrecognized line is still in the script
        for commit in analysis.unlisted() {
            if !positions.contains_key(commit) && !mentioned.contains(commit) {
                eliminated.entry(commit).or_insert(Elimination::Unlisted);
            }
        }

        Self {
            positions,
            eliminated,
            labels,
        }
    }

    fn is_retained(&self, commit: &CommitId) -> bool {
        self.positions.contains_key(commit)
    }

    fn label<'c>(&'c self, commit: &'c CommitId) -> &'c str {
        self.labels.get(commit).copied().unwrap_or_else(|| commit.short())
    }
}
