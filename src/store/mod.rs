//! Where alerts, geofences, subscribers and detections come from.

mod demo;
mod postgres;

pub use demo::DemoStore;
pub use postgres::PgStore;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::models::alert::Alert;
use crate::models::detection::Detection;
use crate::models::geofence::Geofence;
use crate::models::subscriber::Subscriber;
use crate::processor::annotate::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    Demo,
    Database,
    /// Database when reachable, demo otherwise.
    #[default]
    Auto,
}

impl DataMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataMode::Demo => "demo",
            DataMode::Database => "database",
            DataMode::Auto => "auto",
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demo" => Ok(DataMode::Demo),
            "database" | "db" | "postgres" => Ok(DataMode::Database),
            "auto" => Ok(DataMode::Auto),
            other => anyhow::bail!("unknown data mode '{}'", other),
        }
    }
}

pub enum RecordStore {
    Demo(DemoStore),
    Database(PgStore),
}

impl RecordStore {
    /// Opens the store `config.data_mode` asks for. In auto mode a database
    /// that cannot be reached is logged and replaced by the demo dataset.
    pub async fn open(config: &AppConfig, now: DateTime<Utc>) -> anyhow::Result<Self> {
        match config.data_mode {
            DataMode::Demo => Ok(RecordStore::Demo(DemoStore::new(now))),
            DataMode::Database => {
                let store = PgStore::connect(&config.database_url, config.db_max_connections).await?;
                Ok(RecordStore::Database(store))
            }
            DataMode::Auto => {
                match PgStore::connect(&config.database_url, config.db_max_connections).await {
                    Ok(store) => {
                        info!("Connected to database");
                        Ok(RecordStore::Database(store))
                    }
                    Err(e) => {
                        warn!("Database unavailable, using demo data: {}", e);
                        Ok(RecordStore::Demo(DemoStore::new(now)))
                    }
                }
            }
        }
    }

    /// The mode actually in use; never `Auto`.
    pub fn mode(&self) -> DataMode {
        match self {
            RecordStore::Demo(_) => DataMode::Demo,
            RecordStore::Database(_) => DataMode::Database,
        }
    }

    pub async fn alerts(&self) -> Result<Vec<Alert>, StoreError> {
        match self {
            RecordStore::Demo(s) => Ok(s.alerts().to_vec()),
            RecordStore::Database(s) => s.alerts().await,
        }
    }

    pub async fn geofences(&self) -> Result<Vec<Geofence>, StoreError> {
        match self {
            RecordStore::Demo(s) => Ok(s.geofences().to_vec()),
            RecordStore::Database(s) => s.geofences().await,
        }
    }

    pub async fn subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        match self {
            RecordStore::Demo(s) => Ok(s.subscribers().to_vec()),
            RecordStore::Database(s) => s.subscribers().await,
        }
    }

    pub async fn detections(&self) -> Result<Vec<Detection>, StoreError> {
        match self {
            RecordStore::Demo(s) => Ok(s.detections().to_vec()),
            RecordStore::Database(s) => s.detections().await,
        }
    }

    /// Marks an alert acknowledged. Returns whether the flag changed.
    pub async fn acknowledge(&mut self, alert_id: &str) -> Result<bool, StoreError> {
        match self {
            RecordStore::Demo(s) => s.acknowledge(alert_id),
            RecordStore::Database(s) => s.acknowledge(alert_id).await,
        }
    }

    pub async fn insert_detection(&mut self, detection: Detection, alert: Alert) -> Result<(), StoreError> {
        match self {
            RecordStore::Demo(s) => {
                s.insert_detection(detection, alert);
                Ok(())
            }
            RecordStore::Database(s) => s.insert_detection(&detection, &alert).await,
        }
    }

    pub async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let (alerts, geofences, subscribers) =
            futures::try_join!(self.alerts(), self.geofences(), self.subscribers())?;
        Ok(Snapshot {
            alerts,
            geofences,
            subscribers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo as dataset;

    fn demo_config() -> AppConfig {
        AppConfig::from_lookup(|key| match key {
            "DATA_MODE" => Some("demo".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_parse_data_mode() {
        assert_eq!("Demo".parse::<DataMode>().unwrap(), DataMode::Demo);
        assert_eq!("postgres".parse::<DataMode>().unwrap(), DataMode::Database);
        assert_eq!(" auto ".parse::<DataMode>().unwrap(), DataMode::Auto);
        assert!("mongo".parse::<DataMode>().is_err());
        assert_eq!(DataMode::Database.to_string(), "database");
    }

    #[tokio::test]
    async fn test_demo_snapshot() {
        let store = RecordStore::open(&demo_config(), Utc::now()).await.unwrap();
        assert_eq!(store.mode(), DataMode::Demo);

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.alerts.len(), dataset::DEMO_ALERT_COUNT);
        assert_eq!(snapshot.geofences.len(), 22);
        assert_eq!(snapshot.subscribers.len(), 30);
        assert!(!store.detections().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_acknowledge_through_store() {
        let mut store = RecordStore::open(&demo_config(), Utc::now()).await.unwrap();

        // alert-002 starts unacknowledged
        assert!(store.acknowledge("alert-002").await.unwrap());
        assert!(!store.acknowledge("alert-002").await.unwrap());
        let alerts = store.alerts().await.unwrap();
        assert!(alerts.iter().find(|a| a.id == "alert-002").unwrap().acknowledged);

        let err = store.acknowledge("alert-999").await.unwrap_err();
        assert!(matches!(err, StoreError::AlertNotFound { ref id } if id == "alert-999"));
    }

    #[tokio::test]
    async fn test_auto_falls_back_to_demo() {
        let config = AppConfig::from_lookup(|key| match key {
            "DB_HOST" => Some("127.0.0.1".to_string()),
            "DB_PORT" => Some("1".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.data_mode, DataMode::Auto);

        let store = RecordStore::open(&config, Utc::now()).await.unwrap();
        assert_eq!(store.mode(), DataMode::Demo);
    }
}
