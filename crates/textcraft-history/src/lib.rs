/// Bounded undo/redo history for editable text surfaces.
///
/// Provides a `HistoryStore` that keeps a linear, coalesced sequence of
/// full-text snapshots with a cursor, and a redb-backed `SnapshotVault`
/// for best-effort recovery of that sequence across reloads.
pub mod config;
pub mod snapshot;
pub mod store;
pub mod vault;

pub use config::HistoryConfig;
pub use snapshot::Snapshot;
pub use store::HistoryStore;
pub use vault::SnapshotVault;
