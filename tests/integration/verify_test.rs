//! Tests for verify-rebase-interactive

use predicates::prelude::*;
use std::fs;

use crate::common::git_repo::{Fixture, short};
use crate::rebase_lint;

// =============================================================================
// Clean scripts
// =============================================================================

#[test]
fn original_order_is_clean() {
    let fx = Fixture::new();
    let todo = fx.repo.write_todo(
        "todo",
        &format!(
            "pick {} Change two\npick {} Change three\npick {} Add other file\n",
            fx.a7(),
            fx.b7(),
            fx.c7()
        ),
    );

    rebase_lint()
        .args(["verify-rebase-interactive"])
        .arg(&todo)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn independent_commit_can_move_first() {
    let fx = Fixture::new();
    let todo = fx
        .repo
        .write_todo("todo", &format!("pick {}\npick {}\npick {}\n", fx.c7(), fx.a7(), fx.b7()));

    rebase_lint()
        .arg("verify-rebase-interactive")
        .arg(&todo)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn script_without_commits_needs_no_repository() {
    let dir = tempfile::TempDir::new().unwrap();
    let todo = dir.path().join("todo");
    fs::write(&todo, "# nothing left\nnoop\n").unwrap();

    rebase_lint()
        .arg("verify-rebase-interactive")
        .arg(&todo)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// =============================================================================
// Findings
// =============================================================================

#[test]
fn dependent_before_dependency_is_an_error() {
    let fx = Fixture::new();
    let todo = fx
        .repo
        .write_todo("todo", &format!("pick {}\npick {}\npick {}\n", fx.b7(), fx.a7(), fx.c7()));

    let expected = format!(
        "{}:1:6: error: commit {} is scheduled before its dependency {}\n",
        todo.display(),
        fx.b7(),
        fx.a7()
    );
    rebase_lint()
        .arg("verify-rebase-interactive")
        .arg(&todo)
        .assert()
        .code(1)
        .stdout(expected);
}

#[test]
fn content_signal_can_be_disabled() {
    let fx = Fixture::new();
    let todo = fx
        .repo
        .write_todo("todo", &format!("pick {}\npick {}\n", fx.b7(), fx.a7()));

    rebase_lint()
        .args(["verify-rebase-interactive", "--no-content"])
        .arg(&todo)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn dropping_a_dependency_is_an_error() {
    let fx = Fixture::new();
    let todo = fx
        .repo
        .write_todo("todo", &format!("drop {}\npick {}\n", fx.a7(), fx.b7()));

    rebase_lint()
        .arg("verify-rebase-interactive")
        .arg(&todo)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(format!(
            ":2:6: error: commit {} depends on {}, which is dropped",
            fx.b7(),
            fx.a7()
        )));
}

#[test]
fn trailer_cycle_is_reported_once() {
    let fx = Fixture::with_a_message("Change two\n\nDepends-on: tag-d");
    fx.repo.git(&["tag", "tag-d", &fx.b]);
    let todo = fx
        .repo
        .write_todo("todo", &format!("pick {}\npick {}\n", fx.a7(), fx.b7()));

    let output = rebase_lint()
        .arg("verify-rebase-interactive")
        .arg(&todo)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1, "{stdout}");
    assert!(stdout.contains(&format!(
        ":1:6: error: commits {}, {} depend on each other (dependency cycle)",
        fx.a7(),
        fx.b7()
    )));
}

#[test]
fn unrecognized_command_only_warns() {
    let fx = Fixture::new();
    let todo = fx
        .repo
        .write_todo("todo", &format!("pick {}\nfrobnicate {}\n", fx.a7(), fx.b7()));

    rebase_lint()
        .arg("verify-rebase-interactive")
        .arg(&todo)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            ":2:1: warning: unrecognized command 'frobnicate'; line not checked",
        ));
}

#[test]
fn commit_on_unrecognized_line_is_not_treated_as_removed() {
    let fx = Fixture::new();
    let todo = fx
        .repo
        .write_todo("todo", &format!("frobnicate {}\npick {}\n", fx.a7(), fx.b7()));

    rebase_lint()
        .args(["verify-rebase-interactive", "--onto", &fx.base])
        .arg(&todo)
        .assert()
        .success()
        .stdout(format!(
            "{}:1:1: warning: unrecognized command 'frobnicate'; line not checked\n",
            todo.display()
        ));
}

#[test]
fn submodule_bump_in_range_is_not_fatal() {
    let fx = Fixture::new();
    fx.repo.stage_gitlink("sub", &fx.a);
    let added = fx.repo.commit_staged("Add submodule");
    fx.repo.stage_gitlink("sub", &fx.b);
    let bumped = fx.repo.commit_staged("Bump submodule");
    let todo = fx.repo.write_todo(
        "todo",
        &format!(
            "pick {}\npick {}\npick {}\npick {}\npick {}\n",
            fx.a7(),
            fx.b7(),
            fx.c7(),
            short(&added),
            short(&bumped)
        ),
    );

    rebase_lint()
        .args(["verify-rebase-interactive", "--onto", &fx.base])
        .arg(&todo)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn json_output() {
    let fx = Fixture::new();
    let todo = fx
        .repo
        .write_todo("todo", &format!("pick {}\npick {}\n", fx.b7(), fx.a7()));

    let output = rebase_lint()
        .args(["--json", "verify-rebase-interactive"])
        .arg(&todo)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim_end()).unwrap();
    assert_eq!(value["kind"], "ordering");
    assert_eq!(value["line"], 1);
    assert_eq!(value["commits"][0], fx.b.as_str());
    assert_eq!(value["commits"][1], fx.a.as_str());
}

// =============================================================================
// In-progress rebase
// =============================================================================

#[test]
fn rebase_merge_layout_reports_deleted_lines() {
    let fx = Fixture::new();
    let rebase_dir = fx.repo.path().join(".git/rebase-merge");
    fs::create_dir_all(&rebase_dir).unwrap();
    fs::write(rebase_dir.join("onto"), format!("{}\n", fx.base)).unwrap();
    fs::write(
        rebase_dir.join("git-rebase-todo"),
        format!("pick {} Change three\npick {} Add other file\n", fx.b7(), fx.c7()),
    )
    .unwrap();

    rebase_lint()
        .args(["verify-rebase-interactive", ".git/rebase-merge/git-rebase-todo"])
        .current_dir(fx.repo.path())
        .assert()
        .code(1)
        .stdout(format!(
            ".git/rebase-merge/git-rebase-todo:1:6: error: commit {} depends on {}, which is removed from the todo list\n",
            fx.b7(),
            short(&fx.a)
        ));
}

#[test]
fn explicit_onto_overrides_discovery() {
    let fx = Fixture::new();
    let todo = fx.repo.write_todo("todo", &format!("pick {}\n", fx.c7()));

    rebase_lint()
        .args(["verify-rebase-interactive", "--onto", &fx.base])
        .arg(&todo)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    rebase_lint()
        .args(["verify-rebase-interactive", "--onto", "no-such-rev"])
        .arg(&todo)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no-such-rev"));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn malformed_line_is_reported_at_its_position() {
    let dir = tempfile::TempDir::new().unwrap();
    let todo = dir.path().join("todo");
    fs::write(&todo, "pick\n").unwrap();

    rebase_lint()
        .arg("verify-rebase-interactive")
        .arg(&todo)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(":1:5: error: malformed todo line"));
}

#[test]
fn unresolvable_commit_is_fatal() {
    let fx = Fixture::new();
    let todo = fx
        .repo
        .write_todo("todo", &format!("pick {}\npick nosuchcommit\n", fx.a7()));

    rebase_lint()
        .arg("verify-rebase-interactive")
        .arg(&todo)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 2: commit 'nosuchcommit' cannot be resolved"));
}

#[test]
fn missing_script_is_fatal() {
    rebase_lint()
        .args(["verify-rebase-interactive", "/nonexistent/git-rebase-todo"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("error: cannot read"));
}
