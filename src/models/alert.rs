use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Detection,
    Weather,
    Wildlife,
    Utility,
    System,
    EmberCloud,
    Hotspot,
    WildlifeRescue,
    Evacuation,
    #[serde(other)]
    Unknown,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Detection => "detection",
            AlertType::Weather => "weather",
            AlertType::Wildlife => "wildlife",
            AlertType::Utility => "utility",
            AlertType::System => "system",
            AlertType::EmberCloud => "ember_cloud",
            AlertType::Hotspot => "hotspot",
            AlertType::WildlifeRescue => "wildlife_rescue",
            AlertType::Evacuation => "evacuation",
            AlertType::Unknown => "unknown",
        }
    }

    /// Display label used by the alert center.
    pub fn label(&self) -> &'static str {
        match self {
            AlertType::EmberCloud => "Ember Cloud Track",
            AlertType::Hotspot => "Hotspot ID",
            AlertType::WildlifeRescue => "Wildlife Rescue",
            AlertType::Evacuation => "Evacuation",
            AlertType::Detection => "Fire Detection",
            AlertType::Weather => "Weather Warning",
            AlertType::Wildlife => "Wildlife Survey",
            AlertType::Utility => "Utility Alert",
            AlertType::System => "System",
            AlertType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Controlled,
    Resolved,
    Patrolled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AlertStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geofence_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_ids: Option<BTreeSet<String>>,
}

impl Alert {
    pub fn new(id: impl Into<String>, alert_type: AlertType, severity: Severity) -> Self {
        Self {
            id: id.into(),
            alert_type,
            severity,
            title: String::new(),
            message: String::new(),
            timestamp: Utc::now(),
            location: None,
            status: None,
            actions: Vec::new(),
            impact: None,
            video_url: None,
            image_url: None,
            acknowledged: false,
            geofence_id: None,
            drone_id: None,
            subscriber_ids: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(AlertStatus::Active)
    }

    /// Alerts with no status are treated as live, same as the dashboard's
    /// "active" range.
    pub fn is_live(&self) -> bool {
        matches!(self.status, None | Some(AlertStatus::Active))
    }

    /// Acknowledging only ever moves the flag forward.
    pub fn acknowledge(&mut self) -> bool {
        let changed = !self.acknowledged;
        self.acknowledged = true;
        changed
    }
}
