/// Text utilities for the command layer: statistics, case transforms,
/// heuristic risk analysis, and the surface capability seam.
pub mod risk;
pub mod stats;
pub mod surface;
pub mod transform;

pub use risk::{analyze, RiskLevel, RiskReport};
pub use stats::TextStats;
pub use surface::{supports_text_capture, InMemorySurface, SurfaceKind, TextSurface};
pub use transform::TransformKind;
