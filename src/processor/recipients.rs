use std::collections::BTreeSet;

use crate::models::alert::AlertType;
use crate::models::subscriber::{Persona, Subscriber};

/// Roster id of `persona` at slot `index + offset`, wrapped to the persona's
/// pool (`sub-homeowner-3`).
fn roster_id(persona: Persona, index: usize, offset: usize) -> String {
    let pool = persona.pool_size();
    format!("{}-{}", persona.id_prefix(), (index % pool + offset) % pool + 1)
}

/// Subscriber ids that should receive an alert of `alert_type`. `index` only
/// spreads alerts across the roster; the same pair always yields the same set.
pub fn recipients_for(alert_type: AlertType, index: usize) -> BTreeSet<String> {
    use Persona::*;

    let mut picks: Vec<(Persona, usize)> = vec![(FireRanger, 0), (IncidentCommander, 0)];

    match alert_type {
        AlertType::Wildlife | AlertType::WildlifeRescue => {
            picks.extend([
                (WildlifeBiologist, 0),
                (WildlifeBiologist, 1),
                (RuralHomeowner, 0),
                (RuralHomeowner, 1),
            ]);
        }
        AlertType::Utility => {
            picks.extend([
                (UtilityEngineer, 0),
                (UtilityEngineer, 1),
                (RuralHomeowner, 0),
                (RuralHomeowner, 2),
            ]);
        }
        AlertType::Evacuation => {
            picks.extend((0..4).map(|k| (RuralHomeowner, k)));
            picks.extend([(FireRanger, 1), (IncidentCommander, 1)]);
        }
        AlertType::EmberCloud | AlertType::Hotspot | AlertType::Detection => {
            picks.extend([(FireRanger, 1), (RuralHomeowner, 0), (RuralHomeowner, 1)]);
            match index % 3 {
                0 => picks.push((UtilityEngineer, 0)),
                1 => picks.push((WildlifeBiologist, 0)),
                _ => {}
            }
        }
        AlertType::Weather => {
            picks.extend([
                (RuralHomeowner, 0),
                (RuralHomeowner, 1),
                (UtilityEngineer, 0),
                (WildlifeBiologist, 0),
            ]);
        }
        AlertType::System | AlertType::Unknown => {
            picks.extend([(RuralHomeowner, 0), (RuralHomeowner, 1)]);
            if index % 2 == 0 {
                picks.push((UtilityEngineer, 0));
            } else {
                picks.push((WildlifeBiologist, 0));
            }
        }
    }

    picks
        .into_iter()
        .map(|(persona, offset)| roster_id(persona, index, offset))
        .collect()
}

/// Persona of each recipient id: from the subscriber roster when the id is
/// known, otherwise inferred from the id itself.
pub fn personas_of<'a, I>(ids: I, roster: &[Subscriber]) -> Vec<(String, Persona)>
where
    I: IntoIterator<Item = &'a String>,
{
    ids.into_iter()
        .map(|id| {
            let persona = roster
                .iter()
                .find(|s| &s.id == id)
                .map(Subscriber::effective_persona)
                .unwrap_or_else(|| Persona::from_subscriber_id(id));
            (id.clone(), persona)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn has_persona(ids: &BTreeSet<String>, persona: Persona) -> bool {
        ids.iter().any(|id| Persona::from_subscriber_id(id) == persona)
    }

    #[test]
    fn test_utility_index_zero() {
        assert_eq!(
            recipients_for(AlertType::Utility, 0),
            set(&[
                "sub-fire-1",
                "sub-commander-1",
                "sub-utility-1",
                "sub-utility-2",
                "sub-homeowner-1",
                "sub-homeowner-3",
            ])
        );
    }

    #[test]
    fn test_evacuation_is_deterministic() {
        let first = recipients_for(AlertType::Evacuation, 3);
        assert!(!first.is_empty());
        for _ in 0..10 {
            assert_eq!(recipients_for(AlertType::Evacuation, 3), first);
        }
        assert_eq!(
            first,
            set(&[
                "sub-fire-4",
                "sub-fire-5",
                "sub-commander-4",
                "sub-commander-5",
                "sub-homeowner-4",
                "sub-homeowner-5",
                "sub-homeowner-6",
                "sub-homeowner-7",
            ])
        );
    }

    #[test]
    fn test_wildlife_always_reaches_biologist_and_homeowner() {
        for alert_type in [AlertType::Wildlife, AlertType::WildlifeRescue] {
            for i in 0..200 {
                let ids = recipients_for(alert_type, i);
                assert!(has_persona(&ids, Persona::WildlifeBiologist), "index {}", i);
                assert!(has_persona(&ids, Persona::RuralHomeowner), "index {}", i);
            }
        }
    }

    #[test]
    fn test_every_type_includes_ranger_and_commander() {
        let types = [
            AlertType::Detection,
            AlertType::Weather,
            AlertType::Wildlife,
            AlertType::Utility,
            AlertType::System,
            AlertType::EmberCloud,
            AlertType::Hotspot,
            AlertType::WildlifeRescue,
            AlertType::Evacuation,
            AlertType::Unknown,
        ];
        for alert_type in types {
            for i in [0, 1, 2, 7, 4999] {
                let ids = recipients_for(alert_type, i);
                assert!(ids.contains(&format!("sub-fire-{}", i % 5 + 1)));
                assert!(ids.contains(&format!("sub-commander-{}", i % 5 + 1)));
            }
        }
    }

    #[test]
    fn test_detection_class_rotates_extra_persona() {
        let zero = recipients_for(AlertType::Hotspot, 0);
        assert!(zero.contains("sub-utility-1"));
        assert!(!has_persona(&zero, Persona::WildlifeBiologist));

        let one = recipients_for(AlertType::Detection, 1);
        assert!(one.contains("sub-wildlife-2"));
        assert!(!has_persona(&one, Persona::UtilityEngineer));

        let two = recipients_for(AlertType::EmberCloud, 2);
        assert!(!has_persona(&two, Persona::UtilityEngineer));
        assert!(!has_persona(&two, Persona::WildlifeBiologist));
        assert_eq!(two.len(), 5);
    }

    #[test]
    fn test_weather_reaches_every_persona() {
        let ids = recipients_for(AlertType::Weather, 6);
        for persona in Persona::ALL {
            assert!(has_persona(&ids, persona), "{:?}", persona);
        }
    }

    #[test]
    fn test_unknown_type_alternates_utility_and_wildlife() {
        let even = recipients_for(AlertType::Unknown, 4);
        assert!(even.contains("sub-utility-5"));
        let odd = recipients_for(AlertType::System, 5);
        assert!(odd.contains("sub-wildlife-1"));
        assert!(odd.contains("sub-homeowner-6"));
        assert!(odd.contains("sub-homeowner-7"));
    }

    #[test]
    fn test_homeowner_pool_wraps() {
        let ids = recipients_for(AlertType::Utility, 9);
        assert!(ids.contains("sub-homeowner-10"));
        assert!(ids.contains("sub-homeowner-2"));
        assert!(ids.contains("sub-utility-5"));
        assert!(ids.contains("sub-utility-1"));
    }

    #[test]
    fn test_huge_index_does_not_overflow() {
        let ids = recipients_for(AlertType::Evacuation, usize::MAX);
        assert!(!ids.is_empty());
    }

    #[test]
    fn test_personas_of_prefers_roster() {
        use crate::models::Location;
        let sub = Subscriber {
            id: "64ab12ef".to_string(),
            user_id: None,
            persona: Some(Persona::UtilityEngineer),
            name: "Raj Kaur".to_string(),
            email: String::new(),
            phone: String::new(),
            location: Location::named(-33.8, 151.2, "Sydney"),
            alerts_enabled: true,
            subscribed_zones: Vec::new(),
            subscribed_geofences: Vec::new(),
            alert_prefs: Default::default(),
            last_received: None,
            camara_verified: false,
        };
        let ids = vec!["64ab12ef".to_string(), "sub-fire-2".to_string(), "nobody".to_string()];
        let personas = personas_of(&ids, &[sub]);
        assert_eq!(personas[0].1, Persona::UtilityEngineer);
        assert_eq!(personas[1].1, Persona::FireRanger);
        assert_eq!(personas[2].1, Persona::Unknown);
    }
}
