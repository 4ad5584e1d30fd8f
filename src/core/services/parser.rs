//! Todo parser
//!
//! Turns the text of a `git-rebase-todo` file into a [`TodoScript`].
//!
//! Grammar of an action line:
//!
//! ```text
//! <verb> [-C | -c] <commit> [<subject>]     pick, reword, edit, squash, fixup, drop
//! <verb> [<argument>]                       exec, break, label, reset, merge, update-ref, noop
//! ```
//!
//! Lines whose first non-blank character is `#` and blank lines are kept so
//! line numbers stay faithful. The first malformed line aborts parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::{Action, Location, TodoLine, TodoScript, Verb};
use crate::error::Error;

static ACTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<verb>\S+)(?:\s+(?P<rest>.*?))?\s*$").expect("action line pattern is valid")
});

static COMMIT_ARGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<option>-[cC])(?:\s+|$))?(?P<commit>[^\s#]\S*)?(?:\s+(?P<subject>.*))?$")
        .expect("commit argument pattern is valid")
});

/// Parse a todo script
///
/// Pure function of `text`: the same input always yields the same script.
pub fn parse(text: &str) -> Result<TodoScript, Error> {
    let mut lines = Vec::new();
    let mut ordinal = 0;

    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() {
            lines.push(TodoLine::Blank);
        } else if trimmed.starts_with('#') {
            lines.push(TodoLine::Comment(raw.to_string()));
        } else {
            lines.push(TodoLine::Action(parse_action(raw, index + 1, ordinal)?));
            ordinal += 1;
        }
    }

    Ok(TodoScript::new(lines))
}

fn parse_action(raw: &str, line: usize, ordinal: usize) -> Result<Action, Error> {
    let caps = ACTION_LINE
        .captures(raw)
        .ok_or_else(|| malformed(line, 1, "expected a command"))?;
    let verb_match = caps.name("verb").ok_or_else(|| malformed(line, 1, "expected a command"))?;
    let verb = Verb::parse(verb_match.as_str());
    let rest = caps.name("rest").filter(|m| !m.as_str().is_empty());
    let after_verb = column(raw, verb_match.end());

    if !verb.takes_commit() {
        if verb.requires_argument() && rest.is_none() {
            return Err(malformed(line, after_verb, &format!("'{verb}' needs an argument")));
        }
        return Ok(Action {
            ordinal,
            verb,
            option: None,
            commit: None,
            argument: rest.map(|m| m.as_str().to_string()).unwrap_or_default(),
            location: Location::new(line, column(raw, verb_match.start()), column(raw, verb_match.end())),
        });
    }

    let Some(rest) = rest else {
        return Err(malformed(line, after_verb, &format!("'{verb}' needs a commit")));
    };
    let args = COMMIT_ARGS
        .captures(rest.as_str())
        .ok_or_else(|| malformed(line, column(raw, rest.start()), "unreadable commit argument"))?;

    let option = args.name("option");
    if let Some(option) = option
        && verb != Verb::Fixup
    {
        return Err(malformed(
            line,
            column(raw, rest.start() + option.start()),
            &format!("option {} is only valid for fixup", option.as_str()),
        ));
    }

    let Some(commit) = args.name("commit") else {
        let at = option.map_or(after_verb, |o| column(raw, rest.start() + o.end()));
        return Err(malformed(line, at, &format!("'{verb}' needs a commit")));
    };

    let start = rest.start() + commit.start();
    let end = rest.start() + commit.end();
    Ok(Action {
        ordinal,
        verb,
        option: option.map(|o| o.as_str().to_string()),
        commit: Some(commit.as_str().to_string()),
        argument: args.name("subject").map(|m| m.as_str().to_string()).unwrap_or_default(),
        location: Location::new(line, column(raw, start), column(raw, end)),
    })
}

/// 1-based character column of a byte offset
fn column(raw: &str, byte: usize) -> usize {
    raw.get(..byte).map_or(byte, |prefix| prefix.chars().count()) + 1
}

fn malformed(line: usize, column: usize, reason: &str) -> Error {
    Error::MalformedTodoLine {
        line,
        column,
        reason: reason.to_string(),
    }
}
