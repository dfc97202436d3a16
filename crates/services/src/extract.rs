//! Locating a JSON array inside free-form model output.
//!
//! Models asked for "JSON only" still wrap answers in prose or markdown
//! fences. `extract_json_array` finds the first top-level `[...]` span by
//! counting brackets. The count is not string-aware: a `[` or `]` inside a
//! quoted JSON string shifts the depth.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("no opening bracket '[' found in text")]
    NoOpeningBracket,
    #[error("no matching closing bracket ']' found")]
    NoClosingBracket,
}

/// Return the first top-level JSON array substring of `text`, verbatim.
pub fn extract_json_array(text: &str) -> Result<&str, MalformedInput> {
    let start = text.find('[').ok_or(MalformedInput::NoOpeningBracket)?;

    let mut depth: usize = 0;
    for (offset, c) in text[start..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    Err(MalformedInput::NoClosingBracket)
}
