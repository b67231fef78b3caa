use serde::{Deserialize, Serialize};

use crate::models::alert::{Alert, AlertStatus, AlertType};
use crate::models::geofence::{Geofence, RiskLevel};
use crate::models::GeoPoint;

/// Roughly 50km at Australian latitudes.
pub const PROXIMITY_THRESHOLD_DEG: f64 = 0.5;

/// How an alert without a `geofenceId` is matched to a geofence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// First geofence whose center lies within the threshold, in raw degrees.
    #[default]
    Center,
    /// First geofence whose boundary polygon contains the alert. Geofences
    /// without a usable polygon fall back to the center test.
    Polygon,
}

impl std::str::FromStr for MatchStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "center" | "distance" => Ok(MatchStrategy::Center),
            "polygon" => Ok(MatchStrategy::Polygon),
            other => Err(anyhow::anyhow!("unknown geofence match strategy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    Red,
    Orange,
    Green,
    Amber,
    LightGreen,
    Gray,
}

/// Which precedence rule produced a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorReason {
    Severe,
    EmberRisk,
    Patrolled,
    RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeofenceColor {
    pub token: ColorToken,
    pub reason: ColorReason,
}

impl GeofenceColor {
    pub fn hex(&self) -> &'static str {
        match (self.reason, self.token) {
            (ColorReason::Severe, _) => "#ff0000",
            (ColorReason::EmberRisk, _) => "#ff8800",
            (ColorReason::Patrolled, _) => "#00ff00",
            (ColorReason::RiskLevel, ColorToken::Red) => "#ff4444",
            (ColorReason::RiskLevel, ColorToken::Orange) => "#ff8800",
            (ColorReason::RiskLevel, ColorToken::Amber) => "#ffaa00",
            (ColorReason::RiskLevel, ColorToken::LightGreen) => "#88ff88",
            (ColorReason::RiskLevel, _) => "#888888",
        }
    }

    fn from_risk(risk: Option<RiskLevel>) -> Self {
        let token = match risk {
            Some(RiskLevel::Critical) => ColorToken::Red,
            Some(RiskLevel::High) => ColorToken::Orange,
            Some(RiskLevel::Medium) => ColorToken::Amber,
            Some(RiskLevel::Low) => ColorToken::LightGreen,
            Some(RiskLevel::Unknown) | None => ColorToken::Gray,
        };
        Self {
            token,
            reason: ColorReason::RiskLevel,
        }
    }
}

/// Matches alerts to geofences. Holds no data; every call reads only its
/// arguments.
#[derive(Debug, Clone, Copy)]
pub struct Correlator {
    threshold_deg: f64,
    strategy: MatchStrategy,
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new(PROXIMITY_THRESHOLD_DEG, MatchStrategy::Center)
    }
}

impl Correlator {
    pub fn new(threshold_deg: f64, strategy: MatchStrategy) -> Self {
        Self {
            threshold_deg,
            strategy,
        }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Owning geofence of `alert`. An explicit id is authoritative: if it
    /// names no geofence the alert is ungrouped. Location is only consulted
    /// when the id is absent.
    pub fn resolve_geofence<'a>(&self, alert: &Alert, geofences: &'a [Geofence]) -> Option<&'a Geofence> {
        if let Some(id) = alert.geofence_id.as_deref() {
            return geofences.iter().find(|g| g.id == id);
        }

        let point = alert.location.as_ref()?.point();
        geofences.iter().find(|g| self.contains(g, point))
    }

    fn contains(&self, geofence: &Geofence, point: GeoPoint) -> bool {
        if self.strategy == MatchStrategy::Polygon {
            let boundary = geofence.boundary();
            if boundary.len() >= 3 {
                return polygon_contains(&boundary, point);
            }
        }
        geofence
            .center_point()
            .is_some_and(|center| degree_distance(center, point) < self.threshold_deg)
    }
}

/// [`Correlator::resolve_geofence`] with the default threshold and strategy.
pub fn resolve_geofence<'a>(alert: &Alert, geofences: &'a [Geofence]) -> Option<&'a Geofence> {
    Correlator::default().resolve_geofence(alert, geofences)
}

/// Display color of `geofence` given the whole alert set. Only alerts whose
/// `geofenceId` names this geofence are considered.
pub fn geofence_color(geofence: &Geofence, alerts: &[Alert]) -> GeofenceColor {
    color_for(
        geofence.risk_level,
        alerts
            .iter()
            .filter(|a| a.geofence_id.as_deref() == Some(geofence.id.as_str())),
    )
}

/// Color from a risk level and the alerts already grouped under it.
/// Rules are checked in order; the first that fires wins.
pub fn color_for<'a, I>(risk: Option<RiskLevel>, alerts: I) -> GeofenceColor
where
    I: IntoIterator<Item = &'a Alert>,
{
    let mut active = false;
    let mut ember = false;
    let mut patrolled = false;
    for alert in alerts {
        active |= alert.status == Some(AlertStatus::Active);
        ember |= alert.alert_type == AlertType::EmberCloud;
        patrolled |= alert.status == Some(AlertStatus::Patrolled);
    }

    if active && risk == Some(RiskLevel::Critical) {
        GeofenceColor {
            token: ColorToken::Red,
            reason: ColorReason::Severe,
        }
    } else if ember {
        GeofenceColor {
            token: ColorToken::Orange,
            reason: ColorReason::EmberRisk,
        }
    } else if patrolled {
        GeofenceColor {
            token: ColorToken::Green,
            reason: ColorReason::Patrolled,
        }
    } else {
        GeofenceColor::from_risk(risk)
    }
}

/// Euclidean distance in raw degrees. Not geodesic.
pub fn degree_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    ((a.lat - b.lat).powi(2) + (a.lng - b.lng).powi(2)).sqrt()
}

/// Even-odd ray casting test in the lng/lat plane.
pub fn polygon_contains(boundary: &[GeoPoint], point: GeoPoint) -> bool {
    let mut inside = false;
    let mut j = boundary.len().wrapping_sub(1);
    for i in 0..boundary.len() {
        let (a, b) = (boundary[i], boundary[j]);
        if (a.lat > point.lat) != (b.lat > point.lat)
            && point.lng < (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::alert::Severity;
    use crate::models::Location;

    fn alert(id: &str, alert_type: AlertType, status: Option<AlertStatus>, geofence: Option<&str>) -> Alert {
        let mut a = Alert::new(id, alert_type, Severity::High);
        a.status = status;
        a.geofence_id = geofence.map(str::to_string);
        a
    }

    fn located(id: &str, lat: f64, lng: f64) -> Alert {
        let mut a = Alert::new(id, AlertType::Detection, Severity::Warning);
        a.location = Some(Location::named(lat, lng, "somewhere"));
        a
    }

    fn fences() -> Vec<Geofence> {
        vec![
            Geofence::new("geo-001", "Blue Mountains Ridge", Some(RiskLevel::Critical))
                .with_center(-33.5, 150.3),
            Geofence::new("geo-002", "Great Ocean Road Fringes", Some(RiskLevel::High))
                .with_center(-38.2, 144.5),
            Geofence::new("geo-003", "Hawkesbury Fringe", Some(RiskLevel::High))
                .with_center(-33.4, 150.8),
        ]
    }

    #[test]
    fn test_resolve_by_explicit_id() {
        let geofences = fences();
        let mut a = alert("a", AlertType::Hotspot, None, Some("geo-002"));
        // Location near geo-001 must not override the explicit id.
        a.location = Some(Location::named(-33.5, 150.3, "Blue Mountains"));
        let g = resolve_geofence(&a, &geofences).unwrap();
        assert_eq!(g.id, "geo-002");
    }

    #[test]
    fn test_resolve_without_id_or_location_is_none() {
        let geofences = fences();
        let a = alert("a", AlertType::Weather, None, None);
        assert!(resolve_geofence(&a, &geofences).is_none());
    }

    #[test]
    fn test_dangling_id_is_ungrouped() {
        let geofences = fences();
        // 0.22 from geo-002, but the explicit id wins.
        let mut a = located("a", -38.0, 144.6);
        a.geofence_id = Some("geo-999".to_string());
        assert!(resolve_geofence(&a, &geofences).is_none());

        let polygon = Correlator::new(PROXIMITY_THRESHOLD_DEG, MatchStrategy::Polygon);
        assert!(polygon.resolve_geofence(&a, &geofences).is_none());

        let mut b = alert("b", AlertType::Weather, None, Some("geo-999"));
        b.location = None;
        assert!(resolve_geofence(&b, &geofences).is_none());
    }

    #[test]
    fn test_resolve_by_proximity() {
        let geofences = fences();
        assert_eq!(
            resolve_geofence(&located("a", -33.6, 150.5), &geofences).unwrap().id,
            "geo-001"
        );
        // 0.5 is exclusive.
        assert!(resolve_geofence(&located("b", -33.0, 150.3), &geofences).is_none());
        assert!(resolve_geofence(&located("c", -12.5, 130.8), &geofences).is_none());
    }

    #[test]
    fn test_first_match_in_iteration_order_wins() {
        let geofences = fences();
        // Within 0.5 of both geo-001 and geo-003.
        let a = located("a", -33.4, 150.6);
        assert_eq!(resolve_geofence(&a, &geofences).unwrap().id, "geo-001");
        let reversed: Vec<Geofence> = geofences.into_iter().rev().collect();
        assert_eq!(resolve_geofence(&a, &reversed).unwrap().id, "geo-003");
    }

    #[test]
    fn test_geofence_without_center_is_skipped() {
        let geofences = vec![Geofence::new("geo-x", "No center", Some(RiskLevel::High))];
        assert!(resolve_geofence(&located("a", 0.0, 0.0), &geofences).is_none());
    }

    #[test]
    fn test_polygon_strategy() {
        let mut square = Geofence::new("geo-sq", "Square", Some(RiskLevel::Low)).with_center(0.0, 0.0);
        square.coordinates = vec![
            vec![-1.0, -1.0],
            vec![1.0, -1.0],
            vec![1.0, 1.0],
            vec![-1.0, 1.0],
        ];
        let geofences = vec![square];
        let corner = located("a", 0.9, 0.9);

        // Outside the 0.5 degree radius but inside the polygon.
        assert!(resolve_geofence(&corner, &geofences).is_none());
        let polygon = Correlator::new(PROXIMITY_THRESHOLD_DEG, MatchStrategy::Polygon);
        assert_eq!(polygon.resolve_geofence(&corner, &geofences).unwrap().id, "geo-sq");
        assert!(polygon.resolve_geofence(&located("b", 1.5, 0.0), &geofences).is_none());
    }

    #[test]
    fn test_polygon_strategy_falls_back_to_center() {
        let geofences = fences();
        let polygon = Correlator::new(PROXIMITY_THRESHOLD_DEG, MatchStrategy::Polygon);
        assert_eq!(
            polygon.resolve_geofence(&located("a", -38.1, 144.4), &geofences).unwrap().id,
            "geo-002"
        );
    }

    #[test]
    fn test_critical_active_is_red_regardless_of_others() {
        let g = Geofence::new("geo-001", "Blue Mountains Ridge", Some(RiskLevel::Critical));
        let alerts = vec![
            alert("a", AlertType::EmberCloud, Some(AlertStatus::Active), Some("geo-001")),
            alert("b", AlertType::Hotspot, Some(AlertStatus::Patrolled), Some("geo-001")),
            alert("c", AlertType::Weather, Some(AlertStatus::Resolved), Some("geo-001")),
        ];
        let color = geofence_color(&g, &alerts);
        assert_eq!(color.token, ColorToken::Red);
        assert_eq!(color.reason, ColorReason::Severe);
        assert_eq!(color.hex(), "#ff0000");
    }

    #[test]
    fn test_resolved_ember_on_high_is_orange() {
        let g = Geofence::new("geo-002", "Great Ocean Road Fringes", Some(RiskLevel::High));
        let alerts = vec![alert("a", AlertType::EmberCloud, Some(AlertStatus::Resolved), Some("geo-002"))];
        let color = geofence_color(&g, &alerts);
        assert_eq!(color.token, ColorToken::Orange);
        assert_eq!(color.reason, ColorReason::EmberRisk);
    }

    #[test]
    fn test_active_on_non_critical_does_not_trigger_severe() {
        let g = Geofence::new("geo-002", "Great Ocean Road Fringes", Some(RiskLevel::High));
        let alerts = vec![
            alert("a", AlertType::Hotspot, Some(AlertStatus::Active), Some("geo-002")),
            alert("b", AlertType::Hotspot, Some(AlertStatus::Patrolled), Some("geo-002")),
        ];
        assert_eq!(geofence_color(&g, &alerts).token, ColorToken::Green);
    }

    #[test]
    fn test_alerts_of_other_geofences_are_ignored() {
        let g = Geofence::new("geo-001", "Blue Mountains Ridge", Some(RiskLevel::Medium));
        let alerts = vec![
            alert("a", AlertType::EmberCloud, Some(AlertStatus::Active), Some("geo-002")),
            alert("b", AlertType::EmberCloud, Some(AlertStatus::Active), None),
        ];
        let color = geofence_color(&g, &alerts);
        assert_eq!(color.token, ColorToken::Amber);
        assert_eq!(color.reason, ColorReason::RiskLevel);
    }

    #[test]
    fn test_risk_level_fallback() {
        let cases = [
            (Some(RiskLevel::Critical), ColorToken::Red, "#ff4444"),
            (Some(RiskLevel::High), ColorToken::Orange, "#ff8800"),
            (Some(RiskLevel::Medium), ColorToken::Amber, "#ffaa00"),
            (Some(RiskLevel::Low), ColorToken::LightGreen, "#88ff88"),
            (Some(RiskLevel::Unknown), ColorToken::Gray, "#888888"),
            (None, ColorToken::Gray, "#888888"),
        ];
        let none: Vec<Alert> = Vec::new();
        for (risk, token, hex) in cases {
            let color = color_for(risk, &none);
            assert_eq!(color.token, token);
            assert_eq!(color.hex(), hex);
        }
    }

    #[test]
    fn test_color_is_idempotent() {
        let g = Geofence::new("geo-001", "Blue Mountains Ridge", Some(RiskLevel::Critical));
        let alerts = vec![alert("a", AlertType::Hotspot, Some(AlertStatus::Patrolled), Some("geo-001"))];
        assert_eq!(geofence_color(&g, &alerts), geofence_color(&g, &alerts));
    }

    #[test]
    fn test_ember_cloud_scenario() {
        let geofences = vec![Geofence::new("geo-001", "Blue Mountains Ridge", Some(RiskLevel::Critical))];
        let alerts = vec![alert("a", AlertType::EmberCloud, Some(AlertStatus::Active), Some("geo-001"))];
        let g = resolve_geofence(&alerts[0], &geofences).unwrap();
        assert_eq!(g.id, "geo-001");
        assert_eq!(geofence_color(g, &alerts).token, ColorToken::Red);
    }

    #[test]
    fn test_color_token_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&ColorToken::LightGreen).unwrap(), r#""light-green""#);
        assert_eq!(serde_json::to_string(&ColorReason::EmberRisk).unwrap(), r#""ember-risk""#);
    }

    #[test]
    fn test_match_strategy_from_str() {
        assert_eq!("polygon".parse::<MatchStrategy>().unwrap(), MatchStrategy::Polygon);
        assert_eq!(" Center ".parse::<MatchStrategy>().unwrap(), MatchStrategy::Center);
        assert!("r-tree".parse::<MatchStrategy>().is_err());
    }
}
