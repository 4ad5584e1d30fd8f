//! Todo script model
//!
//! A [`TodoScript`] keeps every line of the original file so that reported
//! line numbers match what the editor shows. Only [`TodoLine::Action`] lines
//! take part in verification; each action carries its ordinal position among
//! actions and the location of its most relevant token.

use std::fmt;

use serde::Serialize;

/// A rebase-todo command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `pick` / `p`
    Pick,
    /// `reword` / `r`
    Reword,
    /// `edit` / `e`
    Edit,
    /// `squash` / `s`
    Squash,
    /// `fixup` / `f`
    Fixup,
    /// `exec` / `x`
    Exec,
    /// `break` / `b`
    Break,
    /// `drop` / `d`
    Drop,
    /// `label` / `l`
    Label,
    /// `reset` / `t`
    Reset,
    /// `merge` / `m`
    Merge,
    /// `update-ref` / `u`
    UpdateRef,
    /// `noop`
    Noop,
    /// Anything else, kept verbatim
    Unrecognized(String),
}

/// How an action treats the commit it names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The commit survives with its own identity (pick, reword, edit)
    Retain,
    /// The commit is folded into the previous one (squash, fixup)
    Absorb,
    /// The commit is discarded (drop)
    Discard,
    /// No dependency semantics (exec, label, merge, unrecognized, ...)
    Opaque,
}

impl Verb {
    /// Parse a verb token, accepting git's one-letter abbreviations
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token {
            "p" | "pick" => Self::Pick,
            "r" | "reword" => Self::Reword,
            "e" | "edit" => Self::Edit,
            "s" | "squash" => Self::Squash,
            "f" | "fixup" => Self::Fixup,
            "x" | "exec" => Self::Exec,
            "b" | "break" => Self::Break,
            "d" | "drop" => Self::Drop,
            "l" | "label" => Self::Label,
            "t" | "reset" => Self::Reset,
            "m" | "merge" => Self::Merge,
            "u" | "update-ref" => Self::UpdateRef,
            "noop" => Self::Noop,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Full name of the verb as git writes it
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Pick => "pick",
            Self::Reword => "reword",
            Self::Edit => "edit",
            Self::Squash => "squash",
            Self::Fixup => "fixup",
            Self::Exec => "exec",
            Self::Break => "break",
            Self::Drop => "drop",
            Self::Label => "label",
            Self::Reset => "reset",
            Self::Merge => "merge",
            Self::UpdateRef => "update-ref",
            Self::Noop => "noop",
            Self::Unrecognized(name) => name,
        }
    }

    /// Dependency role of the commit this verb names
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Pick | Self::Reword | Self::Edit => Role::Retain,
            Self::Squash | Self::Fixup => Role::Absorb,
            Self::Drop => Role::Discard,
            _ => Role::Opaque,
        }
    }

    /// Whether the verb is followed by a commit token
    #[must_use]
    pub const fn takes_commit(&self) -> bool {
        !matches!(self.role(), Role::Opaque)
    }

    /// Whether an opaque verb is malformed without an argument
    #[must_use]
    pub const fn requires_argument(&self) -> bool {
        matches!(self, Self::Exec | Self::Label | Self::Reset | Self::Merge | Self::UpdateRef)
    }

    /// Whether the action leaves a commit that a later squash/fixup can fold into
    #[must_use]
    pub const fn produces_commit(&self) -> bool {
        matches!(
            self,
            Self::Pick | Self::Reword | Self::Edit | Self::Squash | Self::Fixup | Self::Merge | Self::Reset
        )
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a token in the todo file (1-based, character columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    /// Line number
    pub line: usize,
    /// First column of the token
    pub column: usize,
    /// Column just past the token
    pub end_column: usize,
}

impl Location {
    /// A location spanning `column..end_column` on `line`
    #[must_use]
    pub const fn new(line: usize, column: usize, end_column: usize) -> Self {
        Self {
            line,
            column,
            end_column,
        }
    }

    /// A zero-width location
    #[must_use]
    pub const fn point(line: usize, column: usize) -> Self {
        Self::new(line, column, column)
    }
}

/// One action line of the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Position among actions (0-based, comments and blanks excluded)
    pub ordinal: usize,
    /// The command
    pub verb: Verb,
    /// `-C`/`-c` flag given to `fixup`
    pub option: Option<String>,
    /// Commit token, for verbs that take one
    pub commit: Option<String>,
    /// Remainder of the line: subject for commit verbs, argument otherwise
    pub argument: String,
    /// Location of the commit token (or of the verb when there is none)
    pub location: Location,
}

impl Action {
    /// Dependency role of this action
    #[must_use]
    pub const fn role(&self) -> Role {
        self.verb.role()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb.name())?;
        if let Some(option) = &self.option {
            write!(f, " {option}")?;
        }
        if let Some(commit) = &self.commit {
            write!(f, " {commit}")?;
        }
        if !self.argument.is_empty() {
            write!(f, " {}", self.argument)?;
        }
        Ok(())
    }
}

/// A line of the todo file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoLine {
    /// A command line
    Action(Action),
    /// A `#` comment, kept verbatim
    Comment(String),
    /// An empty or whitespace-only line
    Blank,
}

/// A parsed rebase-todo script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoScript {
    lines: Vec<TodoLine>,
}

impl TodoScript {
    /// Build a script from its lines, in file order
    #[must_use]
    pub const fn new(lines: Vec<TodoLine>) -> Self {
        Self { lines }
    }

    /// All lines, in file order
    #[must_use]
    pub fn lines(&self) -> &[TodoLine] {
        &self.lines
    }

    /// Action lines, in file order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.lines.iter().filter_map(|line| match line {
            TodoLine::Action(action) => Some(action),
            _ => None,
        })
    }

    /// Actions that name a commit (pick, reword, edit, squash, fixup, drop)
    pub fn commit_actions(&self) -> impl Iterator<Item = (&Action, &str)> {
        self.actions().filter_map(|action| {
            action
                .commit
                .as_deref()
                .filter(|_| action.verb.takes_commit())
                .map(|token| (action, token))
        })
    }

    /// Unrecognized actions with the token that would be their commit
    ///
    /// The line is not checked, but a commit it names was not deleted from
    /// the script either.
    pub fn unrecognized_mentions(&self) -> impl Iterator<Item = (&Action, &str)> {
        self.actions().filter_map(|action| match action.verb {
            Verb::Unrecognized(_) => action.argument.split_whitespace().next().map(|token| (action, token)),
            _ => None,
        })
    }
}

impl fmt::Display for TodoScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                TodoLine::Action(action) => writeln!(f, "{action}")?,
                TodoLine::Comment(text) => writeln!(f, "{text}")?,
                TodoLine::Blank => writeln!(f)?,
            }
        }
        Ok(())
    }
}
