use chrono::{DateTime, Duration, Utc};

use crate::models::subscriber::{AlertPrefs, Persona, Subscriber};
use crate::models::Location;

struct Member {
    persona: Persona,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    location: (f64, f64, &'static str),
    enabled: bool,
    geofences: &'static [&'static str],
    prefs: (bool, bool, bool),
    verified: bool,
}

use Persona::{FireRanger, IncidentCommander, RuralHomeowner, UtilityEngineer, WildlifeBiologist};

// Ordered by persona; ids are assigned per persona in this order.
#[rustfmt::skip]
const ROSTER: [Member; 30] = [
    Member { persona: FireRanger, name: "Sarah Thompson", email: "sarah.thompson@nsw.gov.au", phone: "+61 400 123 456", location: (-33.5, 150.3, "Blue Mountains, NSW"), enabled: true, geofences: &["geo-001", "geo-004"], prefs: (true, true, true), verified: true },
    Member { persona: FireRanger, name: "Tom Reilly", email: "tom.reilly@ffm.vic.gov.au", phone: "+61 400 123 457", location: (-38.2, 144.5, "Great Ocean Road, VIC"), enabled: true, geofences: &["geo-002"], prefs: (true, true, true), verified: true },
    Member { persona: FireRanger, name: "Aisha Patel", email: "aisha.patel@qfes.qld.gov.au", phone: "+61 400 123 458", location: (-27.3, 153.1, "Wet Tropics, QLD"), enabled: true, geofences: &["geo-003"], prefs: (true, true, false), verified: false },
    Member { persona: FireRanger, name: "David Murphy", email: "david.murphy@rfs.nsw.gov.au", phone: "+61 400 123 459", location: (-34.5, 150.5, "Southern Highlands, NSW"), enabled: true, geofences: &["geo-001"], prefs: (true, false, true), verified: true },
    Member { persona: FireRanger, name: "Sophie Taylor", email: "sophie.taylor@dfes.wa.gov.au", phone: "+61 400 123 460", location: (-31.95, 115.86, "Karri Forests, WA"), enabled: true, geofences: &[], prefs: (false, true, true), verified: true },
    Member { persona: IncidentCommander, name: "Mike Hargreaves", email: "mike.hargreaves@emv.vic.gov.au", phone: "+61 400 234 561", location: (-37.8136, 144.9631, "Melbourne, VIC"), enabled: true, geofences: &["geo-002", "geo-001"], prefs: (true, true, true), verified: true },
    Member { persona: IncidentCommander, name: "Elena Vasquez", email: "elena.vasquez@rfs.nsw.gov.au", phone: "+61 400 234 562", location: (-33.8688, 151.2093, "Sydney, NSW"), enabled: true, geofences: &["geo-001", "geo-004"], prefs: (true, true, true), verified: true },
    Member { persona: IncidentCommander, name: "James Mitchell", email: "james.mitchell@qfes.qld.gov.au", phone: "+61 400 234 563", location: (-27.4698, 153.0251, "Brisbane, QLD"), enabled: true, geofences: &["geo-003", "geo-009"], prefs: (true, true, true), verified: true },
    Member { persona: IncidentCommander, name: "Karen White", email: "karen.white@dfes.wa.gov.au", phone: "+61 400 234 564", location: (-31.9505, 115.8605, "Perth, WA"), enabled: true, geofences: &[], prefs: (true, true, false), verified: false },
    Member { persona: IncidentCommander, name: "Robert Brown", email: "robert.brown@fire.tas.gov.au", phone: "+61 400 234 565", location: (-42.88, 147.33, "Hobart, TAS"), enabled: true, geofences: &["geo-005"], prefs: (true, true, true), verified: true },
    Member { persona: RuralHomeowner, name: "Priya Singh", email: "priya.singh@example.com", phone: "+61 400 345 671", location: (-31.0833, 150.9167, "Tamworth, NSW"), enabled: true, geofences: &["geo-001"], prefs: (true, true, true), verified: true },
    Member { persona: RuralHomeowner, name: "Jacko Wilson", email: "jacko.wilson@example.com", phone: "+61 400 345 672", location: (-31.95, 115.86, "Perth Outback, WA"), enabled: true, geofences: &["geo-002"], prefs: (true, false, true), verified: true },
    Member { persona: RuralHomeowner, name: "Margaret Chen", email: "margaret.chen@example.com", phone: "+61 400 345 673", location: (-42.88, 147.33, "Hobart, TAS"), enabled: true, geofences: &["geo-005"], prefs: (true, true, false), verified: false },
    Member { persona: RuralHomeowner, name: "Peter Anderson", email: "peter.anderson@example.com", phone: "+61 400 345 674", location: (-33.5, 150.3, "Blue Mountains, NSW"), enabled: true, geofences: &["geo-001", "geo-004"], prefs: (true, true, true), verified: true },
    Member { persona: RuralHomeowner, name: "Lisa Martin", email: "lisa.martin@example.com", phone: "+61 400 345 675", location: (-38.2, 144.5, "Great Ocean Road, VIC"), enabled: true, geofences: &["geo-002"], prefs: (true, true, true), verified: true },
    Member { persona: RuralHomeowner, name: "Mark Davis", email: "mark.davis@example.com", phone: "+61 400 345 676", location: (-27.3, 153.1, "Brisbane Hinterland, QLD"), enabled: true, geofences: &["geo-003", "geo-013"], prefs: (false, true, true), verified: true },
    Member { persona: RuralHomeowner, name: "Jennifer Thompson", email: "jennifer.thompson@example.com", phone: "+61 400 345 677", location: (-33.3, 151.4, "Central Coast, NSW"), enabled: true, geofences: &["geo-001", "geo-012"], prefs: (true, true, false), verified: false },
    Member { persona: RuralHomeowner, name: "Michael Williams", email: "michael.williams@example.com", phone: "+61 400 345 678", location: (-37.7, 145.4, "Yarra Valley, VIC"), enabled: true, geofences: &["geo-002", "geo-010"], prefs: (true, false, true), verified: true },
    Member { persona: RuralHomeowner, name: "Susan Jones", email: "susan.jones@example.com", phone: "+61 400 345 679", location: (-34.9285, 138.6007, "Adelaide Hills, SA"), enabled: true, geofences: &[], prefs: (true, true, true), verified: true },
    Member { persona: RuralHomeowner, name: "Chris Taylor", email: "chris.taylor@example.com", phone: "+61 400 345 680", location: (-35.1, 149.1, "Southern Tablelands, NSW"), enabled: false, geofences: &["geo-001"], prefs: (true, true, true), verified: true },
    Member { persona: UtilityEngineer, name: "Raj Kaur", email: "raj.kaur@ausgrid.com.au", phone: "+61 400 456 781", location: (-33.8688, 151.2093, "Sydney, NSW"), enabled: true, geofences: &["geo-004"], prefs: (true, true, true), verified: true },
    Member { persona: UtilityEngineer, name: "Liam O'Sullivan", email: "liam.osullivan@tasnetworks.com.au", phone: "+61 400 456 782", location: (-42.88, 147.33, "Hobart, TAS"), enabled: true, geofences: &["geo-005"], prefs: (true, true, true), verified: true },
    Member { persona: UtilityEngineer, name: "Amy Zhang", email: "amy.zhang@energex.com.au", phone: "+61 400 456 783", location: (-27.4698, 153.0251, "Brisbane, QLD"), enabled: true, geofences: &["geo-003", "geo-009"], prefs: (true, true, false), verified: false },
    Member { persona: UtilityEngineer, name: "Daniel Kim", email: "daniel.kim@ausnet.com.au", phone: "+61 400 456 784", location: (-37.8136, 144.9631, "Melbourne, VIC"), enabled: true, geofences: &["geo-002", "geo-010"], prefs: (false, true, true), verified: true },
    Member { persona: UtilityEngineer, name: "Emma Walsh", email: "emma.walsh@westernpower.com.au", phone: "+61 400 456 785", location: (-31.9505, 115.8605, "Perth, WA"), enabled: true, geofences: &[], prefs: (true, true, true), verified: true },
    Member { persona: WildlifeBiologist, name: "Lena Kowalski", email: "lena.kowalski@environment.nsw.gov.au", phone: "+61 400 567 891", location: (-33.8688, 151.2093, "Sydney, NSW"), enabled: true, geofences: &["geo-003", "geo-001"], prefs: (true, true, true), verified: true },
    Member { persona: WildlifeBiologist, name: "Dylan Ng", email: "dylan.ng@des.qld.gov.au", phone: "+61 400 567 892", location: (-27.4698, 153.0251, "Brisbane, QLD"), enabled: true, geofences: &["geo-003", "geo-013", "geo-014"], prefs: (true, true, true), verified: true },
    Member { persona: WildlifeBiologist, name: "Sarah Connor", email: "sarah.connor@delwp.vic.gov.au", phone: "+61 400 567 893", location: (-37.8136, 144.9631, "Melbourne, VIC"), enabled: true, geofences: &["geo-002", "geo-008"], prefs: (true, false, true), verified: true },
    Member { persona: WildlifeBiologist, name: "Michael Fitzgerald", email: "michael.fitzgerald@dbca.wa.gov.au", phone: "+61 400 567 894", location: (-31.9505, 115.8605, "Perth, WA"), enabled: true, geofences: &[], prefs: (false, true, false), verified: false },
    Member { persona: WildlifeBiologist, name: "Nicole Brown", email: "nicole.brown@nre.tas.gov.au", phone: "+61 400 567 895", location: (-42.88, 147.33, "Hobart, TAS"), enabled: true, geofences: &["geo-005", "geo-020"], prefs: (true, true, true), verified: true },
];

pub fn subscribers(now: DateTime<Utc>) -> Vec<Subscriber> {
    let mut seen: Vec<Persona> = Vec::new();
    ROSTER
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let slot = seen.iter().filter(|p| **p == m.persona).count() + 1;
            seen.push(m.persona);

            let zones = m
                .geofences
                .iter()
                .filter_map(|g| zone_name(g))
                .map(str::to_string)
                .collect();

            Subscriber {
                id: format!("{}-{}", m.persona.id_prefix(), slot),
                user_id: Some(format!("{}-{}", m.persona.as_str().replace('_', "-"), slot)),
                persona: Some(m.persona),
                name: m.name.to_string(),
                email: m.email.to_string(),
                phone: m.phone.to_string(),
                location: Location {
                    lat: m.location.0,
                    lng: m.location.1,
                    name: None,
                    address: Some(m.location.2.to_string()),
                },
                alerts_enabled: m.enabled,
                subscribed_zones: zones,
                subscribed_geofences: m.geofences.iter().map(|g| g.to_string()).collect(),
                alert_prefs: AlertPrefs {
                    sms: m.prefs.0,
                    push: m.prefs.1,
                    otp_verified: m.prefs.2,
                },
                last_received: Some(now - Duration::hours(1 + i as i64)),
                camara_verified: m.verified,
            }
        })
        .collect()
}

// Legacy zone names kept for subscribers that predate geofence ids.
fn zone_name(geofence_id: &str) -> Option<&'static str> {
    match geofence_id {
        "geo-001" => Some("Blue Mountains High Risk"),
        "geo-002" => Some("Great Ocean Road Fringe"),
        "geo-003" => Some("Koala Habitat Zone"),
        "geo-004" => Some("Ausgrid Power Line Corridor"),
        "geo-005" => Some("TAS Southwest Wilderness"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_ids_follow_persona_pools() {
        let subs = subscribers(Utc::now());
        assert_eq!(subs.len(), 30);
        for persona in Persona::ALL {
            let ids: Vec<&str> = subs
                .iter()
                .filter(|s| s.persona == Some(persona))
                .map(|s| s.id.as_str())
                .collect();
            assert_eq!(ids.len(), persona.pool_size(), "{:?}", persona);
            for (n, id) in ids.iter().enumerate() {
                assert_eq!(*id, format!("{}-{}", persona.id_prefix(), n + 1));
                assert_eq!(Persona::from_subscriber_id(id), persona);
            }
        }
    }

    #[test]
    fn test_roster_details() {
        let subs = subscribers(Utc::now());
        let chris = subs.iter().find(|s| s.id == "sub-homeowner-10").unwrap();
        assert!(!chris.alerts_enabled);
        let sarah = subs.iter().find(|s| s.id == "sub-fire-1").unwrap();
        assert_eq!(sarah.name, "Sarah Thompson");
        assert_eq!(sarah.subscribed_geofences, vec!["geo-001", "geo-004"]);
        assert_eq!(
            sarah.subscribed_zones,
            vec!["Blue Mountains High Risk", "Ausgrid Power Line Corridor"]
        );
    }
}
