use chrono::{DateTime, Duration, Utc};

use crate::models::geofence::{Geofence, GeofenceKind, RiskLevel};
use crate::models::GeoPoint;

struct Site {
    name: &'static str,
    description: &'static str,
    kind: GeofenceKind,
    risk: RiskLevel,
    area: f64,
    region: &'static str,
    subscribers: u32,
    fuel_load: f64,
    center: (f64, f64),
    radius_km: f64,
    zone: Option<&'static str>,
    population_density: f64,
    triggers: [&'static str; 3],
}

use GeofenceKind::{Proactive, Reactive, Utility, Wildlife};
use RiskLevel::{Critical, High, Low, Medium};

#[rustfmt::skip]
const SITES: [Site; 22] = [
    Site { name: "Blue Mountains Ridge", description: "Lightning-prone, 200ha eucalypt overload, post-Red Dawn fuel map", kind: Proactive, risk: Critical, area: 200.0, region: "NSW Blue Mountains", subscribers: 125, fuel_load: 40.0, center: (-33.5, 150.3), radius_km: 15.0, zone: Some("Blue Mountains High Risk"), population_density: 85.0, triggers: ["CAMARA Geofencing Subs", "Auto-drone launch", "Lightning detection"] },
    Site { name: "Great Ocean Road Fringes", description: "Ember drift risk near Apollo Bay, home to 500 residents", kind: Reactive, risk: High, area: 150.0, region: "VIC Great Ocean Road", subscribers: 500, fuel_load: 35.0, center: (-38.2, 144.5), radius_km: 12.0, zone: Some("Great Ocean Road Fringe"), population_density: 120.0, triggers: ["Ember detection", "Wind speed > 40km/h", "Resident evacuation"] },
    Site { name: "Daintree Rainforest Edge", description: "QLD wildlife corridor for cassowaries, monsoon dry spells", kind: Wildlife, risk: High, area: 180.0, region: "QLD Daintree", subscribers: 45, fuel_load: 30.0, center: (-16.2, 145.4), radius_km: 18.0, zone: Some("Koala Habitat Zone"), population_density: 15.0, triggers: ["Wildlife migration", "Monsoon dry spell", "Cassowary habitat"] },
    Site { name: "Adelaide Hills Corridor", description: "High population density, proximity to Adelaide CBD", kind: Proactive, risk: Critical, area: 95.0, region: "SA Adelaide Hills", subscribers: 850, fuel_load: 45.0, center: (-34.9, 138.7), radius_km: 10.0, zone: Some("Ausgrid Power Line Corridor"), population_density: 850.0, triggers: ["Population density alert", "CBD proximity", "Urban interface"] },
    Site { name: "TAS Southwest Wilderness", description: "Remote area, high fuel load, difficult access", kind: Proactive, risk: High, area: 250.0, region: "TAS Southwest", subscribers: 12, fuel_load: 50.0, center: (-43.2, 146.0), radius_km: 20.0, zone: Some("TAS Southwest Wilderness"), population_density: 2.0, triggers: ["Remote detection", "High fuel load", "Wilderness protection"] },
    Site { name: "Perth Hills Fringe", description: "WA interface between urban and bushland", kind: Reactive, risk: High, area: 120.0, region: "WA Perth Hills", subscribers: 320, fuel_load: 38.0, center: (-31.95, 116.0), radius_km: 14.0, zone: None, population_density: 180.0, triggers: ["Urban interface", "Ember attack", "Property protection"] },
    Site { name: "Kangaroo Island North", description: "SA wildlife sanctuary, tourism hotspot", kind: Wildlife, risk: Medium, area: 140.0, region: "SA Kangaroo Island", subscribers: 180, fuel_load: 28.0, center: (-35.7, 137.1), radius_km: 16.0, zone: None, population_density: 45.0, triggers: ["Wildlife protection", "Tourism alert", "Island evacuation"] },
    Site { name: "Grampians National Park", description: "VIC rugged terrain, biodiversity hotspot", kind: Wildlife, risk: Medium, area: 220.0, region: "VIC Grampians", subscribers: 95, fuel_load: 32.0, center: (-37.2, 142.5), radius_km: 22.0, zone: None, population_density: 25.0, triggers: ["Biodiversity protection", "National park", "Tourism"] },
    Site { name: "Brisbane Hinterland", description: "QLD high population, rapid development", kind: Reactive, risk: High, area: 110.0, region: "QLD Brisbane Hinterland", subscribers: 680, fuel_load: 42.0, center: (-27.3, 152.8), radius_km: 13.0, zone: None, population_density: 420.0, triggers: ["Population growth", "Development pressure", "Urban expansion"] },
    Site { name: "Yarra Valley Vineyards", description: "VIC wine region, heritage properties", kind: Utility, risk: Medium, area: 85.0, region: "VIC Yarra Valley", subscribers: 240, fuel_load: 25.0, center: (-37.7, 145.4), radius_km: 11.0, zone: None, population_density: 95.0, triggers: ["Vineyard protection", "Heritage alert", "Agriculture"] },
    Site { name: "Snowy Mountains Alpine", description: "NSW alpine region, snow gum forests", kind: Proactive, risk: Low, area: 190.0, region: "NSW Snowy Mountains", subscribers: 65, fuel_load: 20.0, center: (-36.5, 148.3), radius_km: 19.0, zone: None, population_density: 12.0, triggers: ["Alpine protection", "Snow gum forests", "Tourism"] },
    Site { name: "Central Coast Fringe", description: "NSW coastal development, high density", kind: Reactive, risk: High, area: 75.0, region: "NSW Central Coast", subscribers: 520, fuel_load: 36.0, center: (-33.3, 151.4), radius_km: 9.0, zone: None, population_density: 680.0, triggers: ["Coastal development", "High density", "Property protection"] },
    Site { name: "Fraser Island Perimeter", description: "QLD world heritage, dune systems", kind: Wildlife, risk: Medium, area: 160.0, region: "QLD Fraser Island", subscribers: 120, fuel_load: 22.0, center: (-25.2, 153.1), radius_km: 17.0, zone: None, population_density: 8.0, triggers: ["World heritage", "Dune protection", "Tourism"] },
    Site { name: "Darwin Rural Fringe", description: "NT monsoonal climate, dry season risk", kind: Proactive, risk: Medium, area: 130.0, region: "NT Darwin", subscribers: 85, fuel_load: 28.0, center: (-12.5, 130.8), radius_km: 14.0, zone: None, population_density: 35.0, triggers: ["Dry season", "Monsoonal climate", "Rural properties"] },
    Site { name: "Canberra Bush Capital", description: "ACT urban interface, high risk", kind: Reactive, risk: Critical, area: 90.0, region: "ACT Canberra", subscribers: 450, fuel_load: 48.0, center: (-35.3, 149.1), radius_km: 10.0, zone: None, population_density: 720.0, triggers: ["Capital city", "Urban interface", "High population"] },
    Site { name: "Gold Coast Hinterland", description: "QLD rapid urbanization, infrastructure", kind: Reactive, risk: High, area: 100.0, region: "QLD Gold Coast", subscribers: 750, fuel_load: 40.0, center: (-28.0, 153.3), radius_km: 12.0, zone: None, population_density: 580.0, triggers: ["Urbanization", "Infrastructure", "Tourism"] },
    Site { name: "Tasman Peninsula", description: "TAS historic site, coastal interface", kind: Utility, risk: Medium, area: 80.0, region: "TAS Tasman Peninsula", subscribers: 145, fuel_load: 30.0, center: (-43.1, 147.8), radius_km: 11.0, zone: None, population_density: 55.0, triggers: ["Historic protection", "Coastal interface", "Tourism"] },
    Site { name: "Warrumbungle National Park", description: "NSW dark sky reserve, observatory", kind: Wildlife, risk: Medium, area: 170.0, region: "NSW Warrumbungle", subscribers: 55, fuel_load: 35.0, center: (-31.3, 149.0), radius_km: 15.0, zone: None, population_density: 18.0, triggers: ["Dark sky reserve", "Observatory", "Wildlife"] },
    Site { name: "Margaret River Wine Region", description: "WA wine tourism, heritage", kind: Utility, risk: Medium, area: 105.0, region: "WA Margaret River", subscribers: 280, fuel_load: 27.0, center: (-33.9, 115.1), radius_km: 13.0, zone: None, population_density: 62.0, triggers: ["Wine region", "Tourism", "Heritage"] },
    Site { name: "Cradle Mountain Lake St Clair", description: "TAS world heritage, alpine wilderness", kind: Wildlife, risk: Low, area: 230.0, region: "TAS Cradle Mountain", subscribers: 38, fuel_load: 18.0, center: (-41.7, 145.9), radius_km: 21.0, zone: None, population_density: 3.0, triggers: ["World heritage", "Alpine protection", "Wilderness"] },
    Site { name: "Hunter Valley Vineyards", description: "NSW wine region, coal mining interface", kind: Utility, risk: High, area: 115.0, region: "NSW Hunter Valley", subscribers: 390, fuel_load: 38.0, center: (-32.8, 151.3), radius_km: 14.0, zone: None, population_density: 110.0, triggers: ["Mining interface", "Vineyard protection", "Agriculture"] },
    Site { name: "Flinders Ranges", description: "SA outback, fossil sites, tourism", kind: Wildlife, risk: Low, area: 280.0, region: "SA Flinders Ranges", subscribers: 42, fuel_load: 15.0, center: (-31.4, 138.7), radius_km: 25.0, zone: None, population_density: 1.0, triggers: ["Fossil sites", "Outback tourism", "Wildlife"] },
];

/// Eight-vertex ring around a center, as `[lng, lat]` pairs.
fn ring(center: GeoPoint, radius_km: f64) -> Vec<Vec<f64>> {
    const POINTS: usize = 8;
    let lng_scale = 111.0 * center.lat.to_radians().cos();
    (0..POINTS)
        .map(|i| {
            let angle = (i as f64 / POINTS as f64) * std::f64::consts::TAU;
            let lat = center.lat + (radius_km / 111.0) * angle.cos();
            let lng = center.lng + (radius_km / lng_scale) * angle.sin();
            vec![lng, lat]
        })
        .collect()
}

pub fn geofences(now: DateTime<Utc>) -> Vec<Geofence> {
    SITES
        .iter()
        .enumerate()
        .map(|(i, site)| {
            let center = GeoPoint::new(site.center.0, site.center.1);
            let mut g = Geofence::new(format!("geo-{:03}", i + 1), site.name, Some(site.risk));
            g.description = Some(site.description.to_string());
            g.coordinates = ring(center, site.radius_km);
            g.kind = Some(site.kind);
            g.priority = Some(site.risk);
            g.area = site.area;
            g.region = site.region.to_string();
            g.subscribers = Some(site.subscribers);
            g.last_scan = Some(now - Duration::hours(1 + (i as i64 % 6)));
            g.fuel_load = Some(site.fuel_load);
            g.triggers = site.triggers.iter().map(|t| t.to_string()).collect();
            g.center = Some(center);
            g.zone = site.zone.map(str::to_string);
            g.population_density = Some(site.population_density);
            g
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::correlator::polygon_contains;

    #[test]
    fn test_demo_geofences() {
        let geofences = geofences(Utc::now());
        assert_eq!(geofences.len(), 22);
        assert_eq!(geofences[0].id, "geo-001");
        assert_eq!(geofences[21].id, "geo-022");
        assert_eq!(geofences[0].risk_level, Some(RiskLevel::Critical));
        for g in &geofences {
            let boundary = g.boundary();
            assert_eq!(boundary.len(), 8);
            assert!(polygon_contains(&boundary, g.center.unwrap()), "{}", g.id);
        }
    }
}
