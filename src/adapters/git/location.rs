//! Rebase state discovery
//!
//! During `git rebase -i` the todo lives at
//! `<git-dir>/rebase-merge/git-rebase-todo`, next to an `onto` file holding
//! the base commit. Scripts elsewhere are matched to the repository that
//! contains them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

const REBASE_DIR: &str = "rebase-merge";
const TODO_FILE: &str = "git-rebase-todo";
const ONTO_FILE: &str = "onto";

/// Where to find the repository and base commit for a todo script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseLocation {
    /// Path to start repository discovery from
    pub discover_from: PathBuf,
    /// Base commit recorded by an in-progress rebase
    pub onto: Option<String>,
}

impl RebaseLocation {
    /// Locate the repository for the script at `script`
    pub fn from_script(script: &Path) -> Result<Self, Error> {
        if script.ends_with(Path::new(REBASE_DIR).join(TODO_FILE)) {
            let rebase_dir = script.parent().unwrap_or_else(|| Path::new("."));
            let git_dir = rebase_dir.parent().unwrap_or_else(|| Path::new("."));
            let onto_path = rebase_dir.join(ONTO_FILE);

            let onto = if onto_path.is_file() {
                Some(fs::read_to_string(&onto_path)?.trim().to_string()).filter(|s| !s.is_empty())
            } else {
                None
            };
            log::debug!("rebase in progress in {}, onto {:?}", git_dir.display(), onto);

            return Ok(Self {
                discover_from: git_dir.to_path_buf(),
                onto,
            });
        }

        let discover_from = script
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        Ok(Self {
            discover_from,
            onto: None,
        })
    }
}
