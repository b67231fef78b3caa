use chrono::{DateTime, Utc};
use tracing::info;

use crate::demo as dataset;
use crate::error::StoreError;
use crate::models::alert::Alert;
use crate::models::detection::Detection;
use crate::models::geofence::Geofence;
use crate::models::subscriber::Subscriber;

/// In-memory store seeded with the demo dataset. Writes last as long as the
/// store value.
#[derive(Debug, Clone)]
pub struct DemoStore {
    alerts: Vec<Alert>,
    geofences: Vec<Geofence>,
    subscribers: Vec<Subscriber>,
    detections: Vec<Detection>,
}

impl DemoStore {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            alerts: dataset::alerts(now),
            geofences: dataset::geofences(now),
            subscribers: dataset::subscribers(now),
            detections: dataset::detections(now),
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn geofences(&self) -> &[Geofence] {
        &self.geofences
    }

    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn acknowledge(&mut self, alert_id: &str) -> Result<bool, StoreError> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| StoreError::AlertNotFound {
                id: alert_id.to_string(),
            })?;
        Ok(alert.acknowledge())
    }

    /// New records go first so listings stay newest first.
    pub fn insert_detection(&mut self, detection: Detection, alert: Alert) {
        info!("Stored detection {} with alert {}", detection.id, alert.id);
        self.detections.insert(0, detection);
        self.alerts.insert(0, alert);
    }
}
