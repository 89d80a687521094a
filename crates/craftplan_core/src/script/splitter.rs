//! Script statement splitter.
//!
//! # Responsibility
//! - Strip `--` line comments from raw script text.
//! - Collapse whitespace runs and split on `;` statement terminators.
//!
//! # Invariants
//! - Emitted statements are trimmed and non-empty.
//! - Emitted statements contain neither a comment marker nor a terminator.
//! - A terminator inside a string literal is treated as a statement
//!   boundary; the shipped schema/seed scripts are terminator-safe.

use once_cell::sync::Lazy;
use regex::Regex;

const COMMENT_MARKER: &str = "--";
const STATEMENT_TERMINATOR: char = ';';

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Splits raw script text into individually executable statements.
///
/// Comment-only or empty input yields an empty vector. Non-blank trailing
/// text after the last terminator is emitted as a final statement.
pub fn split_statements(raw: &str) -> Vec<String> {
    let stripped = remove_line_comments(raw);
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");

    collapsed
        .split(STATEMENT_TERMINATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Deletes every `--` comment through its newline, inclusive.
///
/// A comment with no trailing newline deletes to end of input.
fn remove_line_comments(content: &str) -> String {
    let mut kept = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(marker) = rest.find(COMMENT_MARKER) {
        kept.push_str(&rest[..marker]);
        match rest[marker..].find('\n') {
            Some(eol) => rest = &rest[marker + eol + 1..],
            None => return kept,
        }
    }

    kept.push_str(rest);
    kept
}

#[cfg(test)]
mod tests {
    use super::remove_line_comments;

    #[test]
    fn comment_runs_to_end_of_line_inclusive() {
        let cleaned = remove_line_comments("keep -- drop this\nalso keep");
        assert_eq!(cleaned, "keep also keep");
    }

    #[test]
    fn unterminated_comment_runs_to_end_of_input() {
        let cleaned = remove_line_comments("keep -- trailing comment");
        assert_eq!(cleaned, "keep ");
    }

    #[test]
    fn text_without_comments_is_untouched() {
        let cleaned = remove_line_comments("SELECT 1;\nSELECT 2;");
        assert_eq!(cleaned, "SELECT 1;\nSELECT 2;");
    }
}
