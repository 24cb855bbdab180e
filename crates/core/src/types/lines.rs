//! Codec between list-of-strings fields and newline-delimited textarea text.
//!
//! Array-valued record fields (project technologies, service features) are
//! edited in the admin forms as one-item-per-line text. This module is the
//! single place that conversion happens, so the edge cases are pinned down:
//!
//! - decoding trims each line and discards blank lines;
//! - encoding joins with `\n` and rejects items that themselves contain a
//!   newline, since those are unrepresentable in the text form.

use thiserror::Error;

/// Errors from encoding a list into newline-delimited text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineListError {
    /// An item contains an embedded newline and cannot be represented.
    #[error("item {index} contains an embedded newline")]
    EmbeddedNewline {
        /// Zero-based index of the offending item.
        index: usize,
    },
}

/// Decode newline-delimited text into a list of strings.
///
/// Each line is trimmed; blank lines (including whitespace-only lines) are
/// discarded. Handles both `\n` and `\r\n` line endings.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Encode a list of strings as newline-delimited text for a textarea.
///
/// # Errors
///
/// Returns [`LineListError::EmbeddedNewline`] if any item contains a newline,
/// because such an item could not survive a decode round trip.
pub fn join_lines<S: AsRef<str>>(items: &[S]) -> Result<String, LineListError> {
    for (index, item) in items.iter().enumerate() {
        if item.as_ref().contains('\n') || item.as_ref().contains('\r') {
            return Err(LineListError::EmbeddedNewline { index });
        }
    }
    Ok(items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_and_drops_blanks() {
        let text = "React\n  TypeScript  \n\n   \nRust\r\n";
        assert_eq!(split_lines(text), vec!["React", "TypeScript", "Rust"]);
    }

    #[test]
    fn split_empty_text_is_empty_list() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n\n").is_empty());
    }

    #[test]
    fn join_round_trips_through_split() {
        let items = vec!["React".to_owned(), "TypeScript".to_owned()];
        let text = join_lines(&items).expect("encode");
        assert_eq!(split_lines(&text), items);
    }

    #[test]
    fn join_rejects_embedded_newline() {
        let items = ["ok", "bad\nitem"];
        assert_eq!(
            join_lines(&items),
            Err(LineListError::EmbeddedNewline { index: 1 })
        );
    }

    #[test]
    fn join_empty_list_is_empty_text() {
        let items: [&str; 0] = [];
        assert_eq!(join_lines(&items).expect("encode"), "");
    }
}
