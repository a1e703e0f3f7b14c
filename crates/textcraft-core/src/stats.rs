/// Word, character, and line counts for a piece of text.
use serde::{Deserialize, Serialize};

/// Derived statistics over a text's current content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Runs of non-whitespace, as split by whitespace.
    pub words: usize,
    /// Raw character count.
    pub chars: usize,
    /// Number of line breaks + 1; an empty text is one (empty) line.
    pub lines: usize,
}

impl TextStats {
    /// Computes statistics for `text`.
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
            lines: text.matches('\n').count() + 1,
        }
    }
}
