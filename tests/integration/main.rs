//! Integration tests for the rebase-lint CLI
//!
//! These tests build small git histories in temporary directories and run
//! the binary against todo scripts, the way `git rebase -i` would leave them.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

mod verify_test;

use assert_cmd::cargo;

/// Helper function to create a rebase-lint command
fn rebase_lint() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("rebase-lint"))
}
