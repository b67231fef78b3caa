use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;
use uuid::{Builder, Uuid};

use crate::models::alert::{Alert, AlertType, Severity};
use crate::models::detection::{Detection, DetectionStatus, DetectionType};
use crate::models::geofence::Geofence;
use crate::models::Location;
use crate::processor::correlator::Correlator;
use crate::processor::recipients::recipients_for;

pub const SIM_DRONE_ID: &str = "sim-drone-1";

const CITIES: [(&str, f64, f64); 5] = [
    ("Sydney", -33.8688, 151.2093),
    ("Melbourne", -37.8136, 144.9631),
    ("Brisbane", -27.4698, 153.0251),
    ("Perth", -31.9505, 115.8605),
    ("Adelaide", -34.9285, 138.6007),
];

const TYPES: [DetectionType; 3] = [
    DetectionType::Ember,
    DetectionType::SpotFire,
    DetectionType::Wildfire,
];

/// Degrees either side of the city center.
const JITTER_DEG: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct Simulated {
    pub detection: Detection,
    pub alert: Alert,
}

/// Fabricates a thermal detection near one of the capital cities and the
/// alert it raises. `alert_count` is the number of alerts already stored and
/// seeds the recipient rotation.
pub fn simulate_detection<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    geofences: &[Geofence],
    correlator: &Correlator,
    alert_count: usize,
) -> Simulated {
    let id = Builder::from_random_bytes(rng.gen()).into_uuid();

    let (city, lat, lng) = CITIES[rng.gen_range(0..CITIES.len())];
    let lat = lat + rng.gen_range(-JITTER_DEG..=JITTER_DEG);
    let lng = lng + rng.gen_range(-JITTER_DEG..=JITTER_DEG);
    let detection_type = TYPES[rng.gen_range(0..TYPES.len())];
    let temperature = rng.gen_range(25.0..35.0);
    let confidence = rng.gen_range(0.7..1.0);

    let detection = Detection {
        id: id.to_string(),
        timestamp: now,
        location: Location::named(lat, lng, city),
        temperature,
        detection_type,
        confidence,
        drone_id: SIM_DRONE_ID.to_string(),
        drone_name: None,
        status: DetectionStatus::Active,
        image_url: None,
        video_url: None,
        alert_sent: true,
        actions_taken: Vec::new(),
        impact: None,
        zone: None,
    };

    let severity = if detection_type == DetectionType::Wildfire {
        Severity::Critical
    } else {
        Severity::Warning
    };

    let mut alert = Alert::new(
        Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes()).to_string(),
        AlertType::Detection,
        severity,
    );
    alert.title = format!("Thermal {} detected", detection_type.as_str().replacen('_', " ", 1));
    alert.message = format!("Temperature spike detected at {:.4}, {:.4}", lat, lng);
    alert.timestamp = now;
    alert.location = Some(detection.location.clone());
    alert.drone_id = Some(SIM_DRONE_ID.to_string());
    alert.geofence_id = correlator
        .resolve_geofence(&alert, geofences)
        .map(|g| g.id.clone());
    alert.subscriber_ids = Some(recipients_for(AlertType::Detection, alert_count));

    info!(
        "Simulated {} near {} ({:.4}, {:.4}) -> geofence {:?}",
        detection_type.as_str(),
        city,
        lat,
        lng,
        alert.geofence_id
    );

    Simulated { detection, alert }
}
