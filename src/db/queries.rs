// Every collection is a table of JSON documents keyed by the document id.

pub const CREATE_ALERTS: &str = r#"
CREATE TABLE IF NOT EXISTS alerts (
    id TEXT PRIMARY KEY,
    doc JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub const CREATE_GEOFENCES: &str = r#"
CREATE TABLE IF NOT EXISTS geofences (
    id TEXT PRIMARY KEY,
    doc JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub const CREATE_SUBSCRIBERS: &str = r#"
CREATE TABLE IF NOT EXISTS subscribers (
    id TEXT PRIMARY KEY,
    doc JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub const CREATE_DETECTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS detections (
    id TEXT PRIMARY KEY,
    doc JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub const SCHEMA: [&str; 4] = [
    CREATE_ALERTS,
    CREATE_GEOFENCES,
    CREATE_SUBSCRIBERS,
    CREATE_DETECTIONS,
];

// Newest first, same as the dashboard listing.
pub const SELECT_ALERTS: &str = r#"
SELECT id, doc FROM alerts ORDER BY (doc->>'timestamp')::timestamptz DESC NULLS LAST, created_at DESC;
"#;

pub const SELECT_GEOFENCES: &str = r#"
SELECT id, doc FROM geofences ORDER BY id;
"#;

pub const SELECT_SUBSCRIBERS: &str = r#"
SELECT id, doc FROM subscribers ORDER BY id;
"#;

pub const SELECT_DETECTIONS: &str = r#"
SELECT id, doc FROM detections ORDER BY (doc->>'timestamp')::timestamptz DESC NULLS LAST, created_at DESC;
"#;

// Returns the previous flag so callers can tell a first acknowledgement from a repeat.
pub const ACKNOWLEDGE_ALERT: &str = r#"
WITH prev AS (
    SELECT id, COALESCE((doc->>'acknowledged')::boolean, false) AS was_acknowledged
    FROM alerts
    WHERE id = $1
    FOR UPDATE
)
UPDATE alerts a
SET doc = jsonb_set(a.doc, '{acknowledged}', 'true'::jsonb, true)
FROM prev
WHERE a.id = prev.id
RETURNING prev.was_acknowledged;
"#;

pub const INSERT_ALERT: &str = r#"
INSERT INTO alerts (id, doc) VALUES ($1, $2);
"#;

pub const INSERT_DETECTION: &str = r#"
INSERT INTO detections (id, doc) VALUES ($1, $2);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listings_order_by_parsed_timestamp() {
        for sql in [SELECT_ALERTS, SELECT_DETECTIONS] {
            assert!(sql.contains("(doc->>'timestamp')::timestamptz DESC"), "{}", sql);
        }
    }
}
