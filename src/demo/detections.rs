use chrono::{DateTime, Duration, Utc};

use crate::models::detection::{Detection, DetectionStatus, DetectionType};
use crate::models::Location;

struct Sighting {
    place: (&'static str, f64, f64),
    temperature: f64,
    kind: DetectionType,
    confidence: f64,
    drone: &'static str,
    status: DetectionStatus,
    actions: [&'static str; 2],
    impact: &'static str,
    zone: &'static str,
    image: &'static str,
}

use DetectionStatus::{Active, Controlled, Resolved};
use DetectionType::{Ember, HotspotInSmoke, PerimeterBreach, PowerFault, SpotFire, Wildfire, WildlifeSurvey};

#[rustfmt::skip]
const SIGHTINGS: [Sighting; 8] = [
    Sighting { place: ("Blue Mountains Ridge", -33.5, 150.3), temperature: 45.0, kind: HotspotInSmoke, confidence: 0.93, drone: "EmberHunter", status: Active, actions: ["Backburn dispatched to Mike", "Drone swarm deployed"], impact: "2 homes saved, 5 wallabies rescued", zone: "Blue Mountains High Risk", image: "Thermal+Plume" },
    Sighting { place: ("Sydney Fringes", -33.8, 151.2), temperature: 38.0, kind: WildlifeSurvey, confidence: 0.87, drone: "KoalaGuard", status: Controlled, actions: ["Wildlife rescue team dispatched", "Koala habitat protected"], impact: "3 koalas located and protected", zone: "Koala Habitat Zone", image: "Koala+Thermal" },
    Sighting { place: ("Great Ocean Road", -38.2, 144.5), temperature: 42.0, kind: Ember, confidence: 0.91, drone: "BushfireBlaze", status: Active, actions: ["Ember detection alert", "Resident evacuation initiated"], impact: "500 residents alerted", zone: "Great Ocean Road Fringe", image: "Ember+Detection" },
    Sighting { place: ("Adelaide Hills", -34.9, 138.7), temperature: 48.0, kind: SpotFire, confidence: 0.95, drone: "FlameFinder", status: Controlled, actions: ["Fire crew dispatched", "Water bombing initiated"], impact: "Fire contained, no structures lost", zone: "Adelaide Hills Corridor", image: "Spot+Fire" },
    Sighting { place: ("Sydney CBD Proximity", -33.8688, 151.2093), temperature: 35.0, kind: PowerFault, confidence: 0.88, drone: "SparkSpotter", status: Resolved, actions: ["Utility crew dispatched", "Power line repaired"], impact: "Potential ignition source eliminated", zone: "Ausgrid Power Line Corridor", image: "Power+Fault" },
    Sighting { place: ("TAS Southwest", -43.2, 146.0), temperature: 40.0, kind: PerimeterBreach, confidence: 0.92, drone: "WildernessWatch", status: Active, actions: ["Perimeter breach alert", "Remote area response team"], impact: "Remote area monitored", zone: "TAS Southwest Wilderness", image: "Perimeter+Breach" },
    Sighting { place: ("Perth Hills", -31.95, 116.0), temperature: 44.0, kind: Wildfire, confidence: 0.96, drone: "InfernoIntel", status: Controlled, actions: ["Major fire response", "Multiple agencies coordinated"], impact: "Large fire controlled, 10 homes protected", zone: "Perth Hills Fringe", image: "Wildfire" },
    Sighting { place: ("Brisbane Hinterland", -27.3, 152.8), temperature: 39.0, kind: Ember, confidence: 0.89, drone: "EmberEye", status: Resolved, actions: ["Ember suppression", "Preventive measures"], impact: "Fire prevented from spreading", zone: "Brisbane Hinterland", image: "Ember+Detection" },
];

pub fn detections(now: DateTime<Utc>) -> Vec<Detection> {
    SIGHTINGS
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let n = i + 1;
            let (name, lat, lng) = s.place;
            Detection {
                id: format!("det-{:03}", n),
                timestamp: now - Duration::hours(n as i64),
                location: Location::named(lat, lng, name),
                temperature: s.temperature,
                detection_type: s.kind,
                confidence: s.confidence,
                drone_id: format!("demo-drone-{}", n),
                drone_name: Some(format!("{}-{:02}", s.drone, n)),
                status: s.status,
                image_url: Some(format!("https://via.placeholder.com/300x200?text={}", s.image)),
                video_url: None,
                alert_sent: true,
                actions_taken: s.actions.iter().map(|a| a.to_string()).collect(),
                impact: Some(s.impact.to_string()),
                zone: Some(s.zone.to_string()),
            }
        })
        .collect()
}
