/// Disk persistence layer backed by redb.
///
/// One table maps surface_id → bincode-serialized `Vec<Snapshot>`.
/// Writes are best-effort from the store's point of view: the in-memory
/// history stays authoritative when a write fails.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use crate::snapshot::Snapshot;

/// Snapshot table: surface_id → bincode(Vec<Snapshot>).
const SNAPSHOT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

/// Persistence layer for snapshot history backed by redb.
///
/// Thread-safe: redb supports concurrent readers and serialized writers.
/// Shared across surfaces via `Arc<SnapshotVault>`.
pub struct SnapshotVault {
    db: Database,
}

impl std::fmt::Debug for SnapshotVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotVault").finish()
    }
}

impl SnapshotVault {
    /// Opens or creates the vault database in the given directory.
    ///
    /// Creates the directory and database file if they don't exist.
    /// Initializes the table on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the database
    /// cannot be opened.
    pub fn open(data_dir: &Path) -> Result<Arc<Self>> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("textcraft.redb");
        let db = Database::create(&db_path)
            .with_context(|| format!("Failed to open vault database: {}", db_path.display()))?;

        // Ensure the table exists
        let write_txn = db
            .begin_write()
            .context("Failed to begin initial write transaction")?;
        {
            let _ = write_txn
                .open_table(SNAPSHOT_TABLE)
                .context("Failed to create snapshot table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial transaction")?;

        Ok(Arc::new(Self { db }))
    }

    /// Writes the full snapshot sequence for a surface.
    ///
    /// Uses upsert semantics: any previously stored sequence for the same
    /// surface is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write transaction fails.
    pub fn save(&self, surface_id: &str, entries: &[Snapshot]) -> Result<()> {
        let bytes = bincode::serialize(entries).context("Failed to serialize snapshots")?;

        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(SNAPSHOT_TABLE)
                .context("Failed to open snapshot table")?;
            table
                .insert(surface_id, bytes.as_slice())
                .context("Failed to insert snapshots")?;
        }
        write_txn
            .commit()
            .context("Failed to commit write transaction")?;
        Ok(())
    }

    /// Loads the snapshot sequence for a surface, or `None` if nothing
    /// was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction or deserialization fails.
    pub fn load(&self, surface_id: &str) -> Result<Option<Vec<Snapshot>>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(SNAPSHOT_TABLE)
            .context("Failed to open snapshot table")?;

        match table.get(surface_id).context("Failed to read snapshots")? {
            Some(guard) => {
                let entries: Vec<Snapshot> = bincode::deserialize(guard.value())
                    .context("Failed to deserialize snapshots")?;
                Ok(Some(entries))
            }
            None => Ok(None),
        }
    }

    /// Removes the stored sequence for a surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    pub fn delete(&self, surface_id: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(SNAPSHOT_TABLE)
                .context("Failed to open snapshot table")?;
            let _ = table.remove(surface_id);
        }
        write_txn.commit().context("Failed to commit deletion")?;
        Ok(())
    }

    /// Lists all surface IDs with stored history.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction fails.
    pub fn list_surfaces(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(SNAPSHOT_TABLE)
            .context("Failed to open snapshot table")?;

        let mut surface_ids = Vec::new();
        for entry in table.iter().context("Failed to iterate snapshot table")? {
            let (key_guard, _) = entry.context("Failed to read snapshot entry")?;
            surface_ids.push(key_guard.value().to_string());
        }
        Ok(surface_ids)
    }
}
