//! Tests for the order verifier
//!
//! Commits are named by single letters; edges read "commit depends on dependency".

use rebase_lint::core::models::{CommitId, Severity, ViolationKind};
use rebase_lint::core::services::{Analysis, DependencyGraph};

use crate::common::{analysis, check, kinds, positions};

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn chain_in_dependency_order_is_clean() {
    let deps = analysis(&[("b", "a"), ("c", "b")]);
    assert!(check("pick a\npick b\npick c\n", &deps).is_empty());
}

#[test]
fn reversed_chain_reports_each_early_commit() {
    let deps = analysis(&[("b", "a"), ("c", "b")]);
    let violations = check("pick c\npick b\npick a\n", &deps);

    assert_eq!(kinds(&violations), vec![ViolationKind::Ordering, ViolationKind::Ordering]);
    assert_eq!(positions(&violations), vec![(1, 6), (2, 6)]);
    assert_eq!(violations[0].message, "commit c is scheduled before its dependency b");
    assert_eq!(violations[0].severity, Severity::Error);
}

#[test]
fn unrelated_commits_can_be_reordered() {
    let deps = analysis(&[("b", "a")]);
    assert!(check("pick c\npick a\npick b\n", &deps).is_empty());
}

#[test]
fn reword_and_edit_keep_their_commit() {
    let deps = analysis(&[("b", "a")]);
    let violations = check("edit b\nreword a\n", &deps);
    assert_eq!(kinds(&violations), vec![ViolationKind::Ordering]);
}

// =============================================================================
// Eliminated dependencies
// =============================================================================

#[test]
fn dropping_a_dependency_is_an_error_at_the_dependent() {
    let deps = analysis(&[("b", "a")]);
    let violations = check("drop a\npick b\n", &deps);

    assert_eq!(kinds(&violations), vec![ViolationKind::DroppedDependency]);
    assert_eq!(positions(&violations), vec![(2, 6)]);
    assert_eq!(violations[0].message, "commit b depends on a, which is dropped");
}

#[test]
fn fixing_up_a_dependency_away_is_reported() {
    let deps = analysis(&[("c", "b")]);
    let violations = check("pick a\nfixup b\npick c\n", &deps);
    assert_eq!(kinds(&violations), vec![ViolationKind::DroppedDependency]);
    assert!(violations[0].message.ends_with("fixed up into an earlier commit"));
}

#[test]
fn deleted_line_counts_as_removed() {
    let deps = analysis(&[("b", "0123456789abcdef")]).with_unlisted(CommitId::new("0123456789abcdef"));
    let violations = check("pick b\n", &deps);
    assert_eq!(violations[0].message, "commit b depends on 0123456, which is removed from the todo list");
}

#[test]
fn dropped_commits_are_not_checked_themselves() {
    let deps = analysis(&[("b", "a")]);
    assert!(check("drop b\npick a\n", &deps).is_empty());
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn cycle_is_reported_once_at_its_first_member() {
    let deps = analysis(&[("a", "b"), ("b", "c"), ("c", "a")]);
    let violations = check("pick x\npick b\npick a\npick c\n", &deps);

    assert_eq!(kinds(&violations), vec![ViolationKind::CyclicDependency]);
    assert_eq!(positions(&violations), vec![(2, 6)]);
    assert_eq!(violations[0].message, "commits b, a, c depend on each other (dependency cycle)");
    assert_eq!(violations[0].related.len(), 2);
}

#[test]
fn ordering_outside_the_cycle_is_still_reported() {
    let deps = analysis(&[("a", "b"), ("b", "a"), ("d", "a")]);
    let violations = check("pick d\npick a\npick b\n", &deps);
    assert_eq!(
        kinds(&violations),
        vec![ViolationKind::Ordering, ViolationKind::CyclicDependency]
    );
}

// =============================================================================
// Other findings
// =============================================================================

#[test]
fn squash_on_first_line_is_orphaned() {
    let violations = check("squash a\npick b\n", &analysis(&[]));
    assert_eq!(kinds(&violations), vec![ViolationKind::OrphanedSquash]);
    assert_eq!(violations[0].message, "cannot 'squash' commit a without a previous commit");
}

#[test]
fn exec_does_not_give_a_squash_a_base() {
    let violations = check("exec true\nfixup a\n", &analysis(&[]));
    assert_eq!(kinds(&violations), vec![ViolationKind::OrphanedSquash]);
}

#[test]
fn duplicate_listing_is_a_warning() {
    let violations = check("pick a\npick b\npick a\n", &analysis(&[]));
    assert_eq!(kinds(&violations), vec![ViolationKind::DuplicateCommit]);
    assert_eq!(violations[0].severity, Severity::Warning);
    assert_eq!(violations[0].message, "commit a is already listed on line 1");
}

#[test]
fn unknown_command_is_a_warning_only() {
    let violations = check("pick a\nfrobnicate b\n", &analysis(&[]));
    assert_eq!(kinds(&violations), vec![ViolationKind::UnrecognizedVerb]);
    assert!(!violations[0].is_error());
}

#[test]
fn empty_analysis_and_opaque_script_is_clean() {
    let violations = check("exec make\nbreak\nlabel onto\n", &Analysis::new(DependencyGraph::new()));
    assert!(violations.is_empty());
}

#[test]
fn commit_on_unknown_command_is_neither_kept_nor_removed() {
    let deps = analysis(&[("a", "b")]).with_unlisted(CommitId::new("b"));
    let violations = check("frob b\npick a\n", &deps);

    assert_eq!(kinds(&violations), vec![ViolationKind::UnrecognizedVerb]);
    assert!(violations.iter().all(|v| !v.is_error()));
}
