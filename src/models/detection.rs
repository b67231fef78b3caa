use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionType {
    Ember,
    SpotFire,
    Wildfire,
    FalsePositive,
    HotspotInSmoke,
    WildlifeSurvey,
    PowerFault,
    PerimeterBreach,
    #[serde(other)]
    Unknown,
}

impl DetectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionType::Ember => "ember",
            DetectionType::SpotFire => "spot_fire",
            DetectionType::Wildfire => "wildfire",
            DetectionType::FalsePositive => "false_positive",
            DetectionType::HotspotInSmoke => "hotspot_in_smoke",
            DetectionType::WildlifeSurvey => "wildlife_survey",
            DetectionType::PowerFault => "power_fault",
            DetectionType::PerimeterBreach => "perimeter_breach",
            DetectionType::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    #[default]
    Active,
    Controlled,
    Resolved,
    FalseAlarm,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    #[serde(default)]
    pub temperature: f64,
    #[serde(rename = "type")]
    pub detection_type: DetectionType,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub drone_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_name: Option<String>,
    #[serde(default)]
    pub status: DetectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub alert_sent: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions_taken: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detection() {
        let det: Detection = serde_json::from_str(
            r#"{
                "_id": "det-003",
                "timestamp": "2025-01-10T01:00:00Z",
                "location": { "lat": -38.2, "lng": 144.5, "name": "Great Ocean Road" },
                "temperature": 42,
                "type": "ember",
                "confidence": 0.91,
                "droneId": "demo-drone-3",
                "status": "new"
            }"#,
        )
        .unwrap();
        assert_eq!(det.detection_type, DetectionType::Ember);
        assert_eq!(det.status, DetectionStatus::Unknown);
        assert_eq!(det.temperature, 42.0);
        assert!(!det.alert_sent);
    }
}
