/// One surface's command session.
///
/// Owns the surface's `HistoryStore` (explicitly constructed per surface,
/// never process-wide) and executes validated commands against whatever
/// `TextSurface` is attached. The observer side reports edits through
/// `surface_input`; the command side goes through `handle`.
use std::sync::Arc;

use anyhow::Result;

use textcraft_core::{supports_text_capture, SurfaceKind, TextStats, TextSurface};
use textcraft_history::{HistoryConfig, HistoryStore, SnapshotVault};

use crate::command::{
    Command, CommandRequest, CommandResponse, ERR_NO_TEXT_ELEMENT, ERR_UNKNOWN_ACTION,
};

struct AttachedSurface {
    kind: SurfaceKind,
    inner: Box<dyn TextSurface>,
}

/// Session for one tracked surface.
pub struct SurfaceSession {
    store: HistoryStore,
    surface: Option<AttachedSurface>,
}

impl std::fmt::Debug for SurfaceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceSession")
            .field("store", &self.store)
            .field("surface_kind", &self.surface.as_ref().map(|s| s.kind))
            .finish()
    }
}

impl SurfaceSession {
    /// Creates a session with a fresh in-memory history.
    pub fn new(surface_id: String, config: HistoryConfig, vault: Option<Arc<SnapshotVault>>) -> Self {
        Self {
            store: HistoryStore::new(surface_id, config, vault),
            surface: None,
        }
    }

    /// Creates a session, recovering any persisted history for the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault fails to read.
    pub fn resume(
        surface_id: String,
        config: HistoryConfig,
        vault: Option<Arc<SnapshotVault>>,
    ) -> Result<Self> {
        Ok(Self {
            store: HistoryStore::load_or_new(surface_id, config, vault)?,
            surface: None,
        })
    }

    /// Attaches a surface if its kind supports text capture.
    ///
    /// Returns whether the surface was attached. A session with nothing
    /// attached answers mutating commands with "No text element found".
    pub fn attach(&mut self, kind: SurfaceKind, surface: Box<dyn TextSurface>) -> bool {
        if !supports_text_capture(kind) {
            return false;
        }
        self.surface = Some(AttachedSurface { kind, inner: surface });
        true
    }

    /// Detaches the current surface, if any.
    pub fn detach(&mut self) {
        self.surface = None;
    }

    /// Whether a capturable surface is attached.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Read access to the session's history.
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Observer entry point: the surface's content changed to `text`.
    ///
    /// Writes the text through to the surface and records it. Returns
    /// `false` (and records nothing) when no surface is attached.
    pub fn surface_input(&mut self, text: &str) -> bool {
        let Some(attached) = self.surface.as_mut() else {
            return false;
        };
        attached.inner.set_text(text);
        self.store.record(text);
        true
    }

    /// Records the attached surface's current content.
    ///
    /// Duplicate content coalesces away in the store, so calling this on
    /// every change notification is safe.
    pub fn observe(&mut self) {
        if let Some(attached) = &self.surface {
            let text = attached.inner.text();
            self.store.record(&text);
        }
    }

    /// Parses and executes a JSON-encoded request.
    ///
    /// Malformed JSON is answered like an unrecognized action; this layer
    /// never fails.
    pub fn handle_json(&mut self, raw: &str) -> CommandResponse {
        match serde_json::from_str::<CommandRequest>(raw) {
            Ok(request) => self.handle(&request),
            Err(_) => CommandResponse::err(ERR_UNKNOWN_ACTION),
        }
    }

    /// Executes one request and produces its response.
    pub fn handle(&mut self, request: &CommandRequest) -> CommandResponse {
        let Some(command) = Command::parse(request) else {
            return CommandResponse::err(ERR_UNKNOWN_ACTION);
        };

        match command {
            Command::GetStats => {
                // Stats describe whatever the surface currently holds,
                // which may differ from the tracked history.
                let text = self
                    .surface
                    .as_ref()
                    .map(|s| s.inner.text())
                    .unwrap_or_default();
                CommandResponse::Stats(TextStats::of(&text))
            }
            Command::Undo => match self.surface.as_mut() {
                Some(attached) => {
                    if let Some(text) = self.store.undo() {
                        attached.inner.set_text(&text);
                    }
                    // An undo at the oldest entry is an accepted no-op.
                    CommandResponse::ok()
                }
                None => CommandResponse::err(ERR_NO_TEXT_ELEMENT),
            },
            Command::Redo => match self.surface.as_mut() {
                Some(attached) => {
                    if let Some(text) = self.store.redo() {
                        attached.inner.set_text(&text);
                    }
                    CommandResponse::ok()
                }
                None => CommandResponse::err(ERR_NO_TEXT_ELEMENT),
            },
            Command::Transform(kind) => match self.surface.as_mut() {
                Some(attached) => {
                    let transformed = kind.apply(&attached.inner.text());
                    attached.inner.set_text(&transformed);
                    self.store.record(&transformed);
                    CommandResponse::ok()
                }
                None => CommandResponse::err(ERR_NO_TEXT_ELEMENT),
            },
            Command::Restore(text) => match self.surface.as_mut() {
                Some(attached) => {
                    attached.inner.set_text(&text);
                    self.store.record(&text);
                    CommandResponse::ok()
                }
                None => CommandResponse::err(ERR_NO_TEXT_ELEMENT),
            },
        }
    }

    /// The attached surface's current content, if any.
    pub fn surface_text(&self) -> Option<String> {
        self.surface.as_ref().map(|s| s.inner.text())
    }
}
