/// Configuration and surface-id helpers for the history system.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Maximum number of snapshots retained per surface before the
/// oldest entries are evicted.
const DEFAULT_CAPACITY: usize = 100;

/// Configuration for the history system.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Max retained snapshots per surface.
    pub capacity: usize,
    /// Root directory for the snapshot vault database.
    pub data_dir: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            data_dir: resolve_data_dir(),
        }
    }
}

impl HistoryConfig {
    /// Clamps nonsensical values (a store must hold at least one snapshot).
    pub fn sanitized(mut self) -> Self {
        if self.capacity == 0 {
            self.capacity = 1;
        }
        self
    }
}

/// Resolves the data directory path.
///
/// Resolution order:
/// 1. `TEXTCRAFT_DATA_DIR` environment variable
/// 2. `.data/` directory next to the executable
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TEXTCRAFT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
    exe.parent().unwrap_or(Path::new(".")).join(".data")
}

/// Generates a surface ID for a surface addressed by URL or path.
///
/// Uses a hash of the address for stability across sessions.
pub fn surface_id_for_address(address: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    address.hash(&mut hasher);
    format!("surf-{:016x}", hasher.finish())
}

/// Counter for generating unique anonymous surface IDs within a session.
static ANON_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a unique surface ID for a surface with no stable address.
pub fn generate_surface_id() -> String {
    let count = ANON_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("anon-{count}")
}
