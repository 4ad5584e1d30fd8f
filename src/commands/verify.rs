//! Verify command - check a todo script against the repository

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;

use rebase_lint::Error;
use rebase_lint::adapters::git::{DependencySignals, GitHistory, RebaseLocation};
use rebase_lint::core::models::{Location, TodoScript};
use rebase_lint::core::services::{Analysis, DependencyExtractor, parse, verify as verify_order};
use rebase_lint::output::{OutputMode, Reporter};

/// Exit code when at least one error diagnostic was written
const FAILED: u8 = 1;

/// Verify the script at `script_file`
///
/// Diagnostics go to stdout; the exit code is 1 if any of them is an error.
/// Failures that stop verification altogether are returned as `Err`.
pub fn verify(
    script_file: &Path,
    onto: Option<&str>,
    signals: DependencySignals,
    mode: OutputMode,
) -> anyhow::Result<ExitCode> {
    let text = std::fs::read_to_string(script_file)
        .with_context(|| format!("cannot read {}", script_file.display()))?;
    let mut reporter = Reporter::new(
        std::io::stdout().lock(),
        script_file.display().to_string(),
        mode,
    );

    let script = match parse(&text) {
        Ok(script) => script,
        Err(Error::MalformedTodoLine { line, column, reason }) => {
            reporter.report_error(Location::point(line, column), &format!("malformed todo line: {reason}"))?;
            return Ok(ExitCode::from(FAILED));
        },
        Err(err) => return Err(err.into()),
    };

    let analysis = analyse(script_file, &script, onto, signals)?;
    let violations = verify_order(&script, &analysis);
    log::debug!("{} finding(s)", violations.len());

    for violation in &violations {
        reporter.report(violation)?;
    }

    if reporter.errors() > 0 {
        Ok(ExitCode::from(FAILED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn analyse(
    script_file: &Path,
    script: &TodoScript,
    onto: Option<&str>,
    signals: DependencySignals,
) -> anyhow::Result<Analysis> {
    // Nothing to resolve, so the repository is never opened
    if script.commit_actions().next().is_none() {
        return Ok(Analysis::default());
    }

    let location = RebaseLocation::from_script(script_file)?;
    let history = GitHistory::open(&location, onto, signals)?;
    log::debug!("checking {} against {:?}", script_file.display(), history);

    Ok(DependencyExtractor::new(&history).extract(script)?)
}
