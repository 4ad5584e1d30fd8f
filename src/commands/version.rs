//! Version command - print the baked-in build revision

use std::io::Write;
use std::process::ExitCode;

/// Print the revision identifier on its own line
pub fn version() -> anyhow::Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rebase_lint::BUILD_REVISION)?;
    Ok(ExitCode::SUCCESS)
}
