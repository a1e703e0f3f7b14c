/// Surface capability layer.
///
/// A surface is an editable region whose content one `HistoryStore`
/// tracks. The single capability predicate here replaces per-command
/// duck-typed element checks.
use serde::{Deserialize, Serialize};

/// What kind of editable element a surface is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    TextArea,
    TextInput,
    ContentEditable,
    /// Anything else (buttons, checkboxes, read-only regions).
    Other,
}

/// Whether a surface of this kind can have its text captured and replaced.
pub fn supports_text_capture(kind: SurfaceKind) -> bool {
    !matches!(kind, SurfaceKind::Other)
}

/// The seam between the command layer and whatever renders the text.
///
/// Implementations hold the live content; the history core only ever sees
/// full-text strings passing through this trait.
pub trait TextSurface {
    /// The surface's full current content.
    fn text(&self) -> String;

    /// Replaces the surface's content.
    fn set_text(&mut self, text: &str);
}

/// A plain in-process surface, used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurface {
    content: String,
}

impl InMemorySurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface pre-filled with `text`.
    pub fn with_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
        }
    }
}

impl TextSurface for InMemorySurface {
    fn text(&self) -> String {
        self.content.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.content = text.to_string();
    }
}
