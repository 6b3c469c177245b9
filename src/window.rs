//! Text windows around scanned tokens.
//!
//! Attributes are not delimited in the prose, so each token is given a slice
//! of the line bounded by its neighbours:
//!
//! - the backward window runs from the end of the previous token to just past
//!   the current keyword, catching qualifiers written before it
//!   ("10 seconds", "red background");
//! - the forward window runs from the current token to just past the start of
//!   the next one, catching URLs, captions and placement words after it.
//!
//! A token's match begins at its leading delimiter, so the forward window
//! starts with that delimiter and ends right before the next keyword.

use crate::scanner::EntityToken;

/// Byte index one character after `from`, clamped to the end of `line`.
fn next_char(line: &str, from: usize) -> usize {
    line[from..].chars().next().map_or(line.len(), |c| from + c.len_utf8())
}

fn slice(line: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    &line[start..end]
}

/// Window preceding token `index`, for qualifiers written before the keyword.
pub fn backward<'a>(line: &'a str, tokens: &[EntityToken], index: usize) -> &'a str {
    let start = match index.checked_sub(1) {
        Some(previous) => tokens[previous].keyword_end(),
        None => 0,
    };
    let end = next_char(line, tokens[index].keyword_end());
    slice(line, start, end)
}

/// Window following token `index`, for attributes written after the keyword.
pub fn forward<'a>(line: &'a str, tokens: &[EntityToken], index: usize) -> &'a str {
    let start = tokens[index].match_offset;
    let end = match tokens.get(index + 1) {
        // The next token is never at the line start, so this is just past
        // its leading delimiter.
        Some(next) => next_char(line, next.match_offset),
        None => line.len(),
    };
    slice(line, start, end)
}
