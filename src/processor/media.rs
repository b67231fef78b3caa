use crate::models::detection::{Detection, DetectionType};

const WILDLIFE_IMAGES: [&str; 5] = [
    "/koala-wildlife-survey.jpg",
    "/sheep-wildlife-survey.jpg",
    "/kangaroo-wildlife-survey.jpg",
    "/kangaroo-sheep-wildlife-survey.jpg",
    "/kangaroos-bushfire-wildlife-survey.jpg",
];

const EMBER_IMAGES: [&str; 2] = [
    "/ember-detection-wildfire-sheep.jpg",
    "/ember-detection-rural-fire.jpg",
];

const WILDLIFE_VIDEOS: [&str; 2] = ["/wildlife-survey-1.mp4", "/wildlife-survey-2.mp4"];

/// Sum of the code points of `id`. Only needs to be stable, not strong.
pub fn stable_hash(id: &str) -> u64 {
    id.chars().map(|c| c as u64).sum()
}

/// Picks an entry keyed by `id` so the same entity always gets the same one.
pub fn pick<'a>(id: &str, items: &[&'a str]) -> Option<&'a str> {
    if items.is_empty() {
        return None;
    }
    if id.is_empty() {
        return Some(items[0]);
    }
    let idx = (stable_hash(id) % items.len() as u64) as usize;
    Some(items[idx])
}

pub fn detection_image(detection: &Detection) -> Option<String> {
    let fixed = match detection.detection_type {
        DetectionType::WildlifeSurvey => pick(&detection.id, &WILDLIFE_IMAGES),
        DetectionType::Ember => pick(&detection.id, &EMBER_IMAGES),
        DetectionType::PerimeterBreach => Some("/perimeter-breach-fire.jpg"),
        DetectionType::PowerFault => Some("/power-fault-pole.jpg"),
        DetectionType::SpotFire => Some("/spot-fire.jpg"),
        _ => None,
    };
    fixed
        .map(str::to_string)
        .or_else(|| detection.image_url.clone())
}

pub fn detection_video(detection: &Detection) -> Option<String> {
    match detection.detection_type {
        DetectionType::WildlifeSurvey => pick(&detection.id, &WILDLIFE_VIDEOS).map(str::to_string),
        _ => None,
    }
}

/// Replaces the stored media links with the ones the dashboard shows.
pub fn with_media(mut detection: Detection) -> Detection {
    detection.image_url = detection_image(&detection);
    detection.video_url = detection_video(&detection).or(detection.video_url);
    detection
}
