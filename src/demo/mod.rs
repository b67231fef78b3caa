//! Deterministic demo dataset served when no database is in use.

mod alerts;
mod detections;
mod geofences;
mod subscribers;

pub use alerts::{alerts, build_alert, DEMO_ALERT_COUNT};
pub use detections::detections;
pub use geofences::geofences;
pub use subscribers::subscribers;
