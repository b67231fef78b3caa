use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::alert::Alert;
use crate::models::geofence::{Geofence, RiskLevel};
use crate::models::subscriber::{Persona, Subscriber};
use crate::processor::correlator::{color_for, ColorReason, ColorToken, Correlator, GeofenceColor};
use crate::processor::recipients::{personas_of, recipients_for};
use crate::processor::window::AlertWindow;

pub const DEFAULT_ALERT_LIMIT: usize = 100;

/// Everything the pipeline reads, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub alerts: Vec<Alert>,
    pub geofences: Vec<Geofence>,
    pub subscribers: Vec<Subscriber>,
}

#[derive(Debug, Clone)]
pub struct ViewFilter {
    /// Case-insensitive substring of the geofence region.
    pub region: Option<String>,
    pub window: AlertWindow,
    pub limit: usize,
}

impl Default for ViewFilter {
    fn default() -> Self {
        Self {
            region: None,
            window: AlertWindow::All,
            limit: DEFAULT_ALERT_LIMIT,
        }
    }
}

impl ViewFilter {
    fn admits(&self, geofence: &Geofence) -> bool {
        self.region
            .as_deref()
            .map_or(true, |region| geofence.region_matches(region))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorView {
    pub token: ColorToken,
    pub hex: &'static str,
    pub reason: ColorReason,
}

impl From<GeofenceColor> for ColorView {
    fn from(color: GeofenceColor) -> Self {
        Self {
            token: color.token,
            hex: color.hex(),
            reason: color.reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipient {
    pub id: String,
    pub persona: Persona,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedAlert {
    #[serde(flatten)]
    pub alert: Alert,
    pub resolved_geofence_id: Option<String>,
    pub color: Option<ColorView>,
    pub recipients: Vec<Recipient>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceView {
    pub id: String,
    pub name: String,
    pub region: String,
    pub risk_level: Option<RiskLevel>,
    pub color: ColorView,
    pub alert_count: usize,
    pub active_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub geofences: Vec<GeofenceView>,
    pub alerts: Vec<AnnotatedAlert>,
}

/// Resolves, colors and addresses every alert in the snapshot.
///
/// Alerts are grouped by the geofence they *resolve* to, so a geofence's color
/// also reflects alerts matched by location. With a region filter, alerts that
/// do not resolve to a visible geofence are dropped. The limit applies to the
/// listed alerts only; colors and counts use every alert inside the window.
pub fn annotate(
    snapshot: &Snapshot,
    correlator: &Correlator,
    filter: &ViewFilter,
    now: DateTime<Utc>,
) -> Report {
    let resolved: Vec<(usize, &Alert, Option<&Geofence>)> = snapshot
        .alerts
        .iter()
        .enumerate()
        .filter(|(_, alert)| filter.window.admits(alert, now))
        .map(|(position, alert)| {
            let geofence = correlator.resolve_geofence(alert, &snapshot.geofences);
            (position, alert, geofence)
        })
        .filter(|(_, _, geofence)| match geofence {
            Some(g) => filter.admits(g),
            None => filter.region.is_none(),
        })
        .collect();

    let mut groups: HashMap<&str, Vec<&Alert>> = HashMap::new();
    for &(_, alert, geofence) in &resolved {
        if let Some(g) = geofence {
            groups.entry(g.id.as_str()).or_default().push(alert);
        }
    }

    let mut colors: HashMap<&str, GeofenceColor> = HashMap::new();
    let geofences: Vec<GeofenceView> = snapshot
        .geofences
        .iter()
        .filter(|g| filter.admits(g))
        .map(|g| {
            let group: &[&Alert] = groups.get(g.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            let color = color_for(g.risk_level, group.iter().copied());
            colors.insert(g.id.as_str(), color);
            GeofenceView {
                id: g.id.clone(),
                name: g.name.clone(),
                region: g.region.clone(),
                risk_level: g.risk_level,
                color: color.into(),
                alert_count: group.len(),
                active_count: group.iter().filter(|a| a.is_active()).count(),
            }
        })
        .collect();

    let alerts: Vec<AnnotatedAlert> = resolved
        .iter()
        .take(filter.limit)
        .map(|&(position, alert, geofence)| AnnotatedAlert {
            alert: alert.clone(),
            resolved_geofence_id: geofence.map(|g| g.id.clone()),
            color: geofence
                .and_then(|g| colors.get(g.id.as_str()))
                .map(|c| ColorView::from(*c)),
            recipients: recipients(alert, position, &snapshot.subscribers),
        })
        .collect();

    Report { geofences, alerts }
}

/// Stored recipients win; otherwise they are derived from the alert type and
/// its position in the snapshot.
fn recipients(alert: &Alert, position: usize, roster: &[Subscriber]) -> Vec<Recipient> {
    let ids = alert
        .subscriber_ids
        .clone()
        .unwrap_or_else(|| recipients_for(alert.alert_type, position));

    personas_of(&ids, roster)
        .into_iter()
        .map(|(id, persona)| {
            let name = roster.iter().find(|s| s.id == id).map(|s| s.name.clone());
            Recipient {
                id,
                persona,
                name,
                relevance: persona.relevance(),
            }
        })
        .collect()
}
