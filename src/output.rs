//! Diagnostic rendering for human and JSON modes
//!
//! Each finding becomes one line on the sink, either compiler style
//! (`path:line:column: severity: message`) or a JSON object, and is flushed
//! immediately so editors can stream it.

use std::io::{self, Write};

use serde::Serialize;

use crate::core::models::{CommitId, Location, Severity, Violation};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON lines (machine-readable)
    Json,
}

/// One rendered diagnostic in JSON mode
#[derive(Debug, Serialize)]
pub struct Diagnostic<'a> {
    /// Script path as given on the command line
    pub path: &'a str,
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    /// `error` or `warning`
    pub severity: Severity,
    /// Finding category, absent for malformed lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable message
    pub message: &'a str,
    /// Commits involved, offending commit first
    pub commits: Vec<&'a CommitId>,
}

/// Writes diagnostics for one script and counts them by severity
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    path: String,
    mode: OutputMode,
    errors: usize,
    warnings: usize,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter for the script at `path`
    pub fn new(out: W, path: impl Into<String>, mode: OutputMode) -> Self {
        Self {
            out,
            path: path.into(),
            mode,
            errors: 0,
            warnings: 0,
        }
    }

    /// Render a finding
    pub fn report(&mut self, violation: &Violation) -> io::Result<()> {
        let commits = violation.commit.iter().chain(&violation.related).collect();
        let diagnostic = Diagnostic {
            path: &self.path,
            line: violation.location.line,
            column: violation.location.column,
            severity: violation.severity,
            kind: Some(violation.kind.to_string()),
            message: &violation.message,
            commits,
        };
        let line = render(&diagnostic, self.mode)?;
        self.emit(violation.severity, &line)
    }

    /// Render an error that is not a finding, such as a malformed line
    pub fn report_error(&mut self, location: Location, message: &str) -> io::Result<()> {
        let diagnostic = Diagnostic {
            path: &self.path,
            line: location.line,
            column: location.column,
            severity: Severity::Error,
            kind: None,
            message,
            commits: Vec::new(),
        };
        let line = render(&diagnostic, self.mode)?;
        self.emit(Severity::Error, &line)
    }

    /// Number of error diagnostics written
    #[must_use]
    pub const fn errors(&self) -> usize {
        self.errors
    }

    /// Number of warning diagnostics written
    #[must_use]
    pub const fn warnings(&self) -> usize {
        self.warnings
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, severity: Severity, line: &str) -> io::Result<()> {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

fn render(diagnostic: &Diagnostic<'_>, mode: OutputMode) -> io::Result<String> {
    match mode {
        OutputMode::Human => Ok(format!(
            "{}:{}:{}: {}: {}",
            diagnostic.path, diagnostic.line, diagnostic.column, diagnostic.severity, diagnostic.message
        )),
        OutputMode::Json => serde_json::to_string(diagnostic).map_err(io::Error::other),
    }
}
