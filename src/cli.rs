//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands;
use rebase_lint::adapters::git::{DEFAULT_CONTEXT_LINES, DependencySignals};
use rebase_lint::output::OutputMode;

/// rebase-lint - Check interactive rebase todo scripts before they run
#[derive(Parser, Debug)]
#[command(
    name = "rebase-lint",
    version,
    about = "Check interactive rebase todo scripts before they run",
    long_about = "Report commits an interactive rebase would apply before the commits they depend on.\n\n\
                  Diagnostics use the compiler format path:line:column: severity: message,\n\
                  so editors can show them next to the offending todo line."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output diagnostics as JSON lines (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify the commit order of a git-rebase-todo script
    VerifyRebaseInteractive {
        /// Path to the todo script
        script_file: PathBuf,

        /// Base commit of the rebase (defaults to rebase-merge/onto when present)
        #[arg(long, value_name = "REV")]
        onto: Option<String>,

        /// Unchanged lines around a change that still count as touched
        #[arg(long, value_name = "N", default_value_t = DEFAULT_CONTEXT_LINES)]
        context: u32,

        /// Ignore dependencies derived from changed lines
        #[arg(long)]
        no_content: bool,

        /// Ignore dependencies declared with Depends-on: trailers
        #[arg(long)]
        no_trailers: bool,
    },

    /// Print the source revision this binary was built from
    Version,
}

/// Parse arguments, set up logging and dispatch
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Command::VerifyRebaseInteractive {
            script_file,
            onto,
            context,
            no_content,
            no_trailers,
        } => {
            let signals = DependencySignals {
                context_lines: context,
                content: !no_content,
                trailers: !no_trailers,
            };
            commands::verify(&script_file, onto.as_deref(), signals, output_mode)
        },
        Command::Version => commands::version(),
    }
}
