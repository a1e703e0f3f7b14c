/// Core snapshot history with a cursor.
///
/// Keeps a bounded, linear sequence of full-text snapshots for one
/// editable surface. New edits recorded while the cursor sits mid-history
/// abandon the redo branch; exact-duplicate text is coalesced away; when
/// the capacity is exceeded the oldest entries are evicted and the cursor
/// is shifted by the number evicted so it keeps pointing at the same
/// logical snapshot.
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::HistoryConfig;
use crate::snapshot::Snapshot;
use crate::vault::SnapshotVault;

/// Manages undo/redo history for a single editable surface.
///
/// Each surface gets its own `HistoryStore` with an independent snapshot
/// sequence. The store can optionally persist its entries to a shared
/// `SnapshotVault`; that write is best-effort and never affects the
/// in-memory state.
pub struct HistoryStore {
    /// Retained snapshots, oldest first.
    entries: Vec<Snapshot>,
    /// Index of the currently displayed snapshot; `None` iff `entries`
    /// is empty.
    cursor: Option<usize>,
    /// Max retained snapshots.
    capacity: usize,
    /// Surface identifier used as the vault key.
    surface_id: String,
    /// Optional disk persistence (None = in-memory only).
    vault: Option<Arc<SnapshotVault>>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("surface_id", &self.surface_id)
            .field("entries_len", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl HistoryStore {
    /// Creates a new empty HistoryStore.
    ///
    /// Pass `vault: None` for in-memory-only mode (useful in tests or for
    /// surfaces that don't need reload recovery).
    pub fn new(surface_id: String, config: HistoryConfig, vault: Option<Arc<SnapshotVault>>) -> Self {
        let config = config.sanitized();
        Self {
            entries: Vec::new(),
            cursor: None,
            capacity: config.capacity,
            surface_id,
            vault,
        }
    }

    /// Creates an in-memory-only HistoryStore with default config.
    ///
    /// Convenience constructor for tests and simple usage.
    pub fn in_memory() -> Self {
        Self::new(String::from("test"), HistoryConfig::default(), None)
    }

    /// Creates an in-memory-only HistoryStore with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let config = HistoryConfig {
            capacity,
            ..HistoryConfig::default()
        };
        Self::new(String::from("test"), config, None)
    }

    /// Loads existing history from the vault, or creates a fresh store.
    ///
    /// Restored entries are truncated to the configured capacity (oldest
    /// first) and the cursor is placed at the newest entry; the redo
    /// position is not persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault fails to read.
    pub fn load_or_new(
        surface_id: String,
        config: HistoryConfig,
        vault: Option<Arc<SnapshotVault>>,
    ) -> Result<Self> {
        let config = config.sanitized();
        let entries = match &vault {
            Some(v) => {
                let stored = v
                    .load(&surface_id)
                    .context("Failed to load history from vault")?;
                let mut entries = stored.unwrap_or_default();
                let excess = entries.len().saturating_sub(config.capacity);
                if excess > 0 {
                    entries.drain(..excess);
                }
                entries
            }
            None => Vec::new(),
        };

        let cursor = entries.len().checked_sub(1);
        Ok(Self {
            entries,
            cursor,
            capacity: config.capacity,
            surface_id,
            vault,
        })
    }

    /// Returns the surface ID.
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records the full current text of the surface.
    ///
    /// A text identical to the current snapshot is coalesced away (the
    /// call is a no-op). Otherwise any redo branch past the cursor is
    /// discarded, the new snapshot is appended, and the oldest entries
    /// are evicted if the capacity is exceeded. Always succeeds.
    pub fn record(&mut self, text: &str) {
        if let Some(cur) = self.cursor {
            if self.entries[cur].text == text {
                return;
            }
            // Abandon the redo branch: history is linear, not a tree.
            self.entries.truncate(cur + 1);
        }

        self.entries.push(Snapshot::capture(text));
        self.cursor = Some(self.entries.len() - 1);

        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.drain(..evicted);
            // Shift by the exact number evicted so the cursor keeps
            // pointing at the same logical snapshot.
            self.cursor = self.cursor.map(|c| c - evicted);
        }

        self.persist();
    }

    /// Steps the cursor back one snapshot and returns its text.
    ///
    /// Returns `None` when already at the oldest entry (or empty); the
    /// caller must leave the surface untouched in that case.
    pub fn undo(&mut self) -> Option<String> {
        let cur = self.cursor?;
        if cur == 0 {
            return None;
        }
        self.cursor = Some(cur - 1);
        Some(self.entries[cur - 1].text.clone())
    }

    /// Steps the cursor forward one snapshot and returns its text.
    ///
    /// Returns `None` when already at the newest entry (or empty).
    pub fn redo(&mut self) -> Option<String> {
        let cur = self.cursor?;
        if cur + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cur + 1);
        Some(self.entries[cur + 1].text.clone())
    }

    /// The snapshot the cursor currently points at, if any.
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.cursor.map(|c| &self.entries[c])
    }

    /// Whether undo would move the cursor.
    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    /// Whether redo would move the cursor.
    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    /// Clears all history from memory and the vault.
    ///
    /// # Errors
    ///
    /// Returns an error if vault cleanup fails.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.cursor = None;

        if let Some(vault) = &self.vault {
            vault
                .delete(&self.surface_id)
                .context("Failed to clear history from vault")?;
        }
        Ok(())
    }

    /// Best-effort vault write of the full entry sequence.
    ///
    /// Failures are logged and swallowed: the in-memory store remains the
    /// source of truth for the session.
    fn persist(&self) {
        let Some(vault) = &self.vault else {
            return;
        };
        if let Err(e) = vault.save(&self.surface_id, &self.entries) {
            tracing::warn!("Failed to persist history for {}: {e}", self.surface_id);
        }
    }
}
