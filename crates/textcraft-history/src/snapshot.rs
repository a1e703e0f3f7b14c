/// The unit of history: one recorded full-text state.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded text state with its capture timestamp.
///
/// Immutable once created; owned exclusively by the `HistoryStore`
/// that recorded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Full content of the surface at capture time (not a diff).
    pub text: String,
    /// Wall-clock moment the snapshot was taken.
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Captures `text` with the current timestamp.
    pub fn capture(text: &str) -> Self {
        Self {
            text: text.to_string(),
            captured_at: Utc::now(),
        }
    }
}
