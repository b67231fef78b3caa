use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::Row;
use tracing::{debug, info, warn};

use crate::db::{self, queries, DbPool};
use crate::demo as dataset;
use crate::error::StoreError;
use crate::models::alert::Alert;
use crate::models::detection::Detection;
use crate::models::geofence::Geofence;
use crate::models::subscriber::Subscriber;

/// Document tables in PostgreSQL. A collection with no rows is served from
/// the demo dataset instead.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = db::init_pool(database_url, max_connections).await?;
        db::ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn load<T: DeserializeOwned>(&self, sql: &str, collection: &str) -> Result<Vec<T>, StoreError> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;
            let Json(doc): Json<Value> = row.try_get("doc")?;
            match serde_json::from_value(with_id(&id, doc)) {
                Ok(doc) => docs.push(doc),
                Err(e) => warn!("Skipping malformed {} document {}: {}", collection, id, e),
            }
        }
        debug!("Loaded {} {} documents", docs.len(), collection);
        Ok(docs)
    }

    pub async fn alerts(&self) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.load(queries::SELECT_ALERTS, "alerts").await?;
        Ok(or_demo(alerts, "alerts", dataset::alerts))
    }

    pub async fn geofences(&self) -> Result<Vec<Geofence>, StoreError> {
        let geofences = self.load(queries::SELECT_GEOFENCES, "geofences").await?;
        Ok(or_demo(geofences, "geofences", dataset::geofences))
    }

    pub async fn subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        let subscribers = self.load(queries::SELECT_SUBSCRIBERS, "subscribers").await?;
        Ok(or_demo(subscribers, "subscribers", dataset::subscribers))
    }

    pub async fn detections(&self) -> Result<Vec<Detection>, StoreError> {
        let detections = self.load(queries::SELECT_DETECTIONS, "detections").await?;
        Ok(or_demo(detections, "detections", dataset::detections))
    }

    pub async fn acknowledge(&self, alert_id: &str) -> Result<bool, StoreError> {
        let row = sqlx::query(queries::ACKNOWLEDGE_ALERT)
            .bind(alert_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let was_acknowledged: bool = row.try_get("was_acknowledged")?;
                Ok(!was_acknowledged)
            }
            None => Err(StoreError::AlertNotFound {
                id: alert_id.to_string(),
            }),
        }
    }

    /// Stores a detection and the alert it raised in one transaction.
    pub async fn insert_detection(&self, detection: &Detection, alert: &Alert) -> Result<(), StoreError> {
        let detection_doc = serde_json::to_value(detection)?;
        let alert_doc = serde_json::to_value(alert)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(queries::INSERT_DETECTION)
            .bind(&detection.id)
            .bind(Json(detection_doc))
            .execute(&mut *tx)
            .await?;

        sqlx::query(queries::INSERT_ALERT)
            .bind(&alert.id)
            .bind(Json(alert_doc))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!("Stored detection {} with alert {}", detection.id, alert.id);
        Ok(())
    }
}

fn or_demo<T>(docs: Vec<T>, collection: &str, demo: fn(DateTime<Utc>) -> Vec<T>) -> Vec<T> {
    if docs.is_empty() {
        info!("No {} stored, using demo data", collection);
        demo(Utc::now())
    } else {
        docs
    }
}

/// Documents written by other tools may leave the id to the row key.
fn with_id(id: &str, mut doc: Value) -> Value {
    if let Value::Object(map) = &mut doc {
        if !map.contains_key("_id") && !map.contains_key("id") {
            map.insert("_id".to_string(), Value::String(id.to_string()));
        }
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_key_fills_missing_id() {
        let doc = with_id("geo-007", json!({ "name": "Kangaroo Island North" }));
        assert_eq!(doc["_id"], "geo-007");

        let doc = with_id("row-key", json!({ "_id": "geo-008" }));
        assert_eq!(doc["_id"], "geo-008");

        let doc = with_id("row-key", json!({ "id": "geo-009" }));
        assert!(doc.get("_id").is_none());

        assert_eq!(with_id("x", json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_stored_geofence_document() {
        let doc = with_id(
            "geo-007",
            json!({
                "name": "Kangaroo Island North",
                "region": "SA Kangaroo Island",
                "riskLevel": "medium",
                "coordinates": [[137.1, -35.6], [137.2, -35.7], [137.1, -35.8]],
                "center": { "lat": "-35.7", "lng": 137.1 }
            }),
        );
        let geofence: Geofence = serde_json::from_value(doc).unwrap();
        assert_eq!(geofence.id, "geo-007");
        assert_eq!(geofence.boundary().len(), 3);
        assert_eq!(geofence.center.map(|c| c.lat), Some(-35.7));
    }

    #[test]
    fn test_empty_collection_uses_demo() {
        let geofences = or_demo(Vec::new(), "geofences", dataset::geofences);
        assert_eq!(geofences.len(), 22);

        let stored = vec![Geofence::new("geo-x", "Only", None)];
        let geofences = or_demo(stored, "geofences", dataset::geofences);
        assert_eq!(geofences.len(), 1);
    }
}
