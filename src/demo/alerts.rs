use chrono::{DateTime, Duration, Utc};

use crate::models::alert::{Alert, AlertStatus, AlertType, Severity};
use crate::models::Location;
use crate::processor::recipients::recipients_for;

pub const DEMO_ALERT_COUNT: usize = 50;
const DEMO_GEOFENCE_COUNT: usize = 22;
const DEMO_DRONE_COUNT: usize = 20;

const PLACES: [(&str, f64, f64); 15] = [
    ("Kosciuszko NP", -36.5, 148.3),
    ("Warrumbungle NP", -31.3, 149.0),
    ("Blue Mountains Ridge", -33.5, 150.3),
    ("Great Ocean Road Fringes", -38.2, 144.5),
    ("Daintree Rainforest Edge", -16.2, 145.4),
    ("Adelaide Hills Corridor", -34.9, 138.7),
    ("TAS Southwest Wilderness", -43.2, 146.0),
    ("Perth Hills Fringe", -31.95, 116.0),
    ("Kangaroo Island North", -35.7, 137.1),
    ("Grampians National Park", -37.2, 142.5),
    ("Brisbane Hinterland", -27.3, 152.8),
    ("Yarra Valley Vineyards", -37.7, 145.4),
    ("Snowy Mountains Alpine", -36.5, 148.3),
    ("Central Coast Fringe", -33.3, 151.4),
    ("Fraser Island Perimeter", -25.2, 153.1),
];

const TYPES: [AlertType; 8] = [
    AlertType::EmberCloud,
    AlertType::Hotspot,
    AlertType::WildlifeRescue,
    AlertType::Evacuation,
    AlertType::Detection,
    AlertType::Weather,
    AlertType::Wildlife,
    AlertType::Utility,
];

const SEVERITIES: [Severity; 5] = [
    Severity::Critical,
    Severity::High,
    Severity::Medium,
    Severity::Low,
    Severity::Warning,
];

const STATUSES: [AlertStatus; 4] = [
    AlertStatus::Active,
    AlertStatus::Controlled,
    AlertStatus::Resolved,
    AlertStatus::Patrolled,
];

struct Blurb {
    title: &'static str,
    message: &'static str,
    actions: [&'static str; 3],
    impact: &'static str,
    video: &'static str,
    image: &'static str,
}

fn blurb_for(alert_type: AlertType) -> Blurb {
    match alert_type {
        AlertType::EmberCloud => Blurb {
            title: "Ember Cloud Track Detected",
            message: "Large ember cloud detected moving towards {place}. Drone swarm tracking trajectory.",
            actions: ["Evac 120 via Priya's SMS", "Backburn dispatched to Mike", "3 Koalas Rescued by Lena"],
            impact: "0 Losses - Successful evacuation",
            video: "Ember+Cloud+Thermal",
            image: "Ember+Plume",
        },
        AlertType::Hotspot => Blurb {
            title: "Hotspot ID - Reactive Alert",
            message: "Hotspot detected in {place}. Water drop coordinated.",
            actions: ["Water Drop Coordinated", "Wildlife: 2 Eagles Spotted", "Fire crew dispatched"],
            impact: "Hotspot contained - No spread",
            video: "Hotspot+Thermal",
            image: "Fire+Plume",
        },
        AlertType::WildlifeRescue => Blurb {
            title: "Wildlife Rescue Operation",
            message: "Wildlife detected in fire path at {place}. Rescue team deployed.",
            actions: ["3 Koalas Rescued by Lena", "Wildlife Biologist team dispatched", "Habitat protection activated"],
            impact: "5 wallabies rescued, 2 eagles relocated",
            video: "Koala+Rescue",
            image: "Rescued+Wildlife",
        },
        AlertType::Evacuation => Blurb {
            title: "Evacuation Alert",
            message: "Evacuation order issued for {place}. Emergency services coordinating.",
            actions: ["Evac 120 via Priya's SMS", "Emergency services deployed", "Shelter locations activated"],
            impact: "All residents safely evacuated",
            video: "Evacuation",
            image: "Evac+Route",
        },
        AlertType::Detection => Blurb {
            title: "Fire Detection Alert",
            message: "Fire detected at {place}. Drone thermal imagery confirms active fire.",
            actions: ["Drone thermal scan", "Fire crew dispatched", "Backburn initiated"],
            impact: "Fire contained - 2 homes saved",
            video: "Thermal+Fire",
            image: "Fire+Detection",
        },
        AlertType::Weather => Blurb {
            title: "Weather Warning",
            message: "Extreme weather conditions detected at {place}. High wind risk.",
            actions: ["Weather monitoring", "Preventive measures", "Alert subscribers"],
            impact: "Early warning - No incidents",
            video: "Weather",
            image: "Storm+Front",
        },
        AlertType::Wildlife => Blurb {
            title: "Wildlife Survey Alert",
            message: "Wildlife activity detected at {place}. Monitoring endangered species.",
            actions: ["Wildlife survey", "Habitat assessment", "Protection measures"],
            impact: "Wildlife habitat protected",
            video: "Wildlife",
            image: "Koala+Sighting",
        },
        AlertType::Utility | AlertType::System | AlertType::Unknown => Blurb {
            title: "Utility Infrastructure Alert",
            message: "Power line fault detected near {place}. Utility crew dispatched.",
            actions: ["Utility crew dispatched", "Power line inspection", "Infrastructure secured"],
            impact: "Potential ignition source eliminated",
            video: "Power+Line",
            image: "Utility+Fault",
        },
    }
}

fn placeholder(text: &str) -> String {
    format!("https://via.placeholder.com/300x200?text={}", text)
}

/// Age of the `index`th demo alert. Most land in the last day so the default
/// views are populated; the tail reaches back a year.
fn age(index: usize) -> Duration {
    // (first index, bucket start, bucket length, bucket size) in minutes
    let (first, start, span, size) = match index {
        0..=14 => (0, 0, 6 * 60, 15),
        15..=24 => (15, 6 * 60, 18 * 60, 10),
        25..=34 => (25, 24 * 60, 144 * 60, 10),
        35..=41 => (35, 168 * 60, 504 * 60, 7),
        _ => (42, 672 * 60, 8016 * 60, 8),
    };
    let slot = (index - first) as i64;
    Duration::minutes(start + span * slot / size + 5)
}

pub fn build_alert(index: usize, now: DateTime<Utc>) -> Alert {
    let (place, lat, lng) = PLACES[index % PLACES.len()];
    let alert_type = TYPES[index % TYPES.len()];
    let blurb = blurb_for(alert_type);

    let mut alert = Alert::new(
        format!("alert-{:03}", index + 1),
        alert_type,
        SEVERITIES[index % SEVERITIES.len()],
    );
    alert.title = blurb.title.to_string();
    alert.message = blurb.message.replace("{place}", place);
    alert.timestamp = now - age(index);
    alert.location = Some(Location::named(lat, lng, place));
    alert.status = Some(STATUSES[index % STATUSES.len()]);
    alert.actions = blurb.actions.iter().map(|a| a.to_string()).collect();
    alert.impact = Some(blurb.impact.to_string());
    alert.video_url = Some(placeholder(blurb.video));
    alert.image_url = Some(placeholder(blurb.image));
    alert.acknowledged = index % 5 == 0;
    alert.geofence_id = Some(format!("geo-{:03}", index % DEMO_GEOFENCE_COUNT + 1));
    alert.drone_id = Some(format!("demo-drone-{}", index % DEMO_DRONE_COUNT + 1));
    alert.subscriber_ids = Some(recipients_for(alert_type, index));
    alert
}

/// Demo alerts, newest first.
pub fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = (0..DEMO_ALERT_COUNT).map(|i| build_alert(i, now)).collect();
    alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    alerts
}
