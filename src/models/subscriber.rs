use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    FireRanger,
    IncidentCommander,
    RuralHomeowner,
    UtilityEngineer,
    WildlifeBiologist,
    #[serde(other)]
    Unknown,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::FireRanger,
        Persona::IncidentCommander,
        Persona::RuralHomeowner,
        Persona::UtilityEngineer,
        Persona::WildlifeBiologist,
    ];

    /// Prefix of the demo roster ids for this persona (`sub-fire-3`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Persona::FireRanger => "sub-fire",
            Persona::IncidentCommander => "sub-commander",
            Persona::RuralHomeowner => "sub-homeowner",
            Persona::UtilityEngineer => "sub-utility",
            Persona::WildlifeBiologist => "sub-wildlife",
            Persona::Unknown => "sub-unknown",
        }
    }

    /// Size of the demo roster for this persona.
    pub fn pool_size(&self) -> usize {
        match self {
            Persona::RuralHomeowner => 10,
            _ => 5,
        }
    }

    /// Infers the persona from a roster id when no subscriber record is at hand.
    pub fn from_subscriber_id(id: &str) -> Persona {
        Persona::ALL
            .into_iter()
            .find(|p| {
                id.strip_prefix(p.id_prefix())
                    .and_then(|rest| rest.strip_prefix('-'))
                    .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
            })
            .unwrap_or(Persona::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::FireRanger => "fire_ranger",
            Persona::IncidentCommander => "incident_commander",
            Persona::RuralHomeowner => "rural_homeowner",
            Persona::UtilityEngineer => "utility_engineer",
            Persona::WildlifeBiologist => "wildlife_biologist",
            Persona::Unknown => "unknown",
        }
    }

    /// Why an alert in a subscribed zone matters to this persona.
    pub fn relevance(&self) -> Option<&'static str> {
        match self {
            Persona::FireRanger => Some("Your patrol zone - Monitor closely"),
            Persona::IncidentCommander => Some("Command priority - Coordinate response"),
            Persona::RuralHomeowner => Some("Near your location - Check evacuation routes"),
            Persona::UtilityEngineer => Some("Infrastructure risk - Inspect immediately"),
            Persona::WildlifeBiologist => Some("Wildlife impact - Habitat assessment needed"),
            Persona::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPrefs {
    #[serde(default = "enabled")]
    pub sms: bool,
    #[serde(default = "enabled")]
    pub push: bool,
    #[serde(default)]
    pub otp_verified: bool,
}

impl Default for AlertPrefs {
    fn default() -> Self {
        Self {
            sms: true,
            push: true,
            otp_verified: false,
        }
    }
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub location: Location,
    #[serde(default = "enabled")]
    pub alerts_enabled: bool,
    #[serde(default)]
    pub subscribed_zones: Vec<String>,
    #[serde(default)]
    pub subscribed_geofences: Vec<String>,
    #[serde(default)]
    pub alert_prefs: AlertPrefs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_received: Option<DateTime<Utc>>,
    #[serde(default)]
    pub camara_verified: bool,
}

impl Subscriber {
    /// Stored persona, else inferred from the roster id.
    pub fn effective_persona(&self) -> Persona {
        self.persona
            .unwrap_or_else(|| Persona::from_subscriber_id(&self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_from_roster_id() {
        assert_eq!(Persona::from_subscriber_id("sub-fire-3"), Persona::FireRanger);
        assert_eq!(
            Persona::from_subscriber_id("sub-homeowner-10"),
            Persona::RuralHomeowner
        );
        assert_eq!(
            Persona::from_subscriber_id("sub-commander-1"),
            Persona::IncidentCommander
        );
        assert_eq!(Persona::from_subscriber_id("sub-fire-"), Persona::Unknown);
        assert_eq!(Persona::from_subscriber_id("64ab12ef"), Persona::Unknown);
    }

    #[test]
    fn test_parse_subscriber_defaults() {
        let sub: Subscriber = serde_json::from_str(
            r#"{
                "_id": "sub-fire-1",
                "name": "Sarah Thompson",
                "phone": "+61 400 123 456",
                "location": { "lat": -33.5, "lng": 150.3, "address": "Blue Mountains, NSW" },
                "persona": "park_warden"
            }"#,
        )
        .unwrap();
        assert_eq!(sub.persona, Some(Persona::Unknown));
        assert!(sub.alerts_enabled);
        assert_eq!(sub.alert_prefs, AlertPrefs::default());
        assert_eq!(sub.location.address.as_deref(), Some("Blue Mountains, NSW"));
    }

    #[test]
    fn test_effective_persona_uses_id_when_missing() {
        let sub: Subscriber = serde_json::from_str(
            r#"{ "_id": "sub-wildlife-2", "location": { "lat": 0, "lng": 0 } }"#,
        )
        .unwrap();
        assert_eq!(sub.effective_persona(), Persona::WildlifeBiologist);
    }
}
