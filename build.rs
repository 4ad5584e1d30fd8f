//! Bakes the source revision into the binary for the `version` command.

use std::path::Path;
use std::process::Command;

const REVISION_VAR: &str = "REBASE_LINT_REVISION";

fn main() {
    println!("cargo:rerun-if-env-changed={REVISION_VAR}");
    watch_git_head();

    let revision = std::env::var(REVISION_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| Path::new(".git").exists().then(git_head).flatten())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env={REVISION_VAR}={}", revision.trim());
}

fn git_head() -> Option<String> {
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Rebuild when HEAD moves, so the baked revision never goes stale
fn watch_git_head() {
    let head = Path::new(".git/HEAD");
    if !head.exists() {
        return;
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    if Path::new(".git/packed-refs").exists() {
        println!("cargo:rerun-if-changed=.git/packed-refs");
    }

    if let Ok(content) = std::fs::read_to_string(head)
        && let Some(reference) = content.trim().strip_prefix("ref: ")
    {
        println!("cargo:rerun-if-changed=.git/{reference}");
    }
}
