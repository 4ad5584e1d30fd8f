//! Commit message trailers declaring dependencies
//!
//! A commit can name its prerequisites explicitly:
//!   Depends-on: <rev>[, <rev>...]
//!
//! Only the final paragraph of a multi-paragraph message is read, as git
//! does for trailers. The key is matched case-insensitively.

const DEPENDS_ON_TRAILER: &str = "Depends-on";

/// Revisions named by `Depends-on:` trailers, in message order
#[must_use]
pub fn depends_on(message: &str) -> Vec<String> {
    let message = message.replace("\r\n", "\n");
    let paragraphs: Vec<&str> = message
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    // A lone subject line is never a trailer block
    let Some(block) = paragraphs.last().filter(|_| paragraphs.len() > 1) else {
        return Vec::new();
    };

    block
        .lines()
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case(DEPENDS_ON_TRAILER))
        .flat_map(|(_, value)| {
            value
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|rev| !rev.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
