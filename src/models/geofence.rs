use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_f64_option, GeoPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeofenceKind {
    Proactive,
    Reactive,
    Wildlife,
    Utility,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Boundary vertices as `[lng, lat]` pairs.
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<GeofenceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<RiskLevel>,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scan: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "parse_f64_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub fuel_load: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(
        default,
        deserialize_with = "parse_f64_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub population_density: Option<f64>,
}

impl Geofence {
    pub fn new(id: impl Into<String>, name: impl Into<String>, risk_level: Option<RiskLevel>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            coordinates: Vec::new(),
            kind: None,
            priority: None,
            area: 0.0,
            region: String::new(),
            risk_level,
            subscribers: None,
            last_scan: None,
            fuel_load: None,
            triggers: Vec::new(),
            center: None,
            zone: None,
            population_density: None,
        }
    }

    pub fn with_center(mut self, lat: f64, lng: f64) -> Self {
        self.center = Some(GeoPoint::new(lat, lng));
        self
    }

    /// Explicit center, else the first boundary vertex.
    pub fn center_point(&self) -> Option<GeoPoint> {
        self.center.or_else(|| self.boundary().into_iter().next())
    }

    /// Boundary vertices; malformed pairs are skipped.
    pub fn boundary(&self) -> Vec<GeoPoint> {
        self.coordinates
            .iter()
            .filter(|pair| pair.len() >= 2)
            .map(|pair| GeoPoint::new(pair[1], pair[0]))
            .collect()
    }

    pub fn region_matches(&self, needle: &str) -> bool {
        self.region.to_lowercase().contains(&needle.to_lowercase())
    }
}
