use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use bushfire_correlator::config::AppConfig;
use bushfire_correlator::error::StoreError;
use bushfire_correlator::models::detection::Detection;
use bushfire_correlator::notify::{DispatchSummary, Dispatcher};
use bushfire_correlator::processor::annotate::{annotate, AnnotatedAlert, GeofenceView, ViewFilter};
use bushfire_correlator::processor::correlator::Correlator;
use bushfire_correlator::processor::media::with_media;
use bushfire_correlator::processor::simulate::simulate_detection;
use bushfire_correlator::store::{DataMode, RecordStore};

#[derive(Serialize)]
struct Output<'a> {
    mode: DataMode,
    geofences: &'a [GeofenceView],
    alerts: &'a [AnnotatedAlert],
    detections: Vec<Detection>,
    dispatch: Option<DispatchSummary>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting bushfire correlator ({} mode)...", config.data_mode);

    let now = Utc::now();
    let mut store = RecordStore::open(&config, now).await?;
    info!("Serving {} data", store.mode());

    let correlator = Correlator::new(config.proximity_threshold_deg, config.geofence_match);

    if config.simulate_detection {
        let geofences = store.geofences().await?;
        let alert_count = store.alerts().await?.len();
        let sim = simulate_detection(&mut rand::thread_rng(), now, &geofences, &correlator, alert_count);
        store.insert_detection(sim.detection, sim.alert).await?;
    }

    for id in &config.acknowledge_alerts {
        match store.acknowledge(id).await {
            Ok(true) => info!("Acknowledged alert {}", id),
            Ok(false) => debug!("Alert {} was already acknowledged", id),
            Err(StoreError::AlertNotFound { id }) => warn!("Cannot acknowledge unknown alert {}", id),
            Err(e) => return Err(e.into()),
        }
    }

    let snapshot = store.snapshot().await?;
    let filter = ViewFilter {
        region: config.region_filter.clone(),
        window: config.alert_window,
        limit: config.alert_limit,
    };
    let report = annotate(&snapshot, &correlator, &filter, now);
    info!(
        "Annotated {} alerts across {} geofences ({:?} matching)",
        report.alerts.len(),
        report.geofences.len(),
        correlator.strategy()
    );

    let dispatch = config
        .dispatch_notifications
        .then(|| Dispatcher::new().dispatch(&report.alerts, &snapshot.subscribers));

    let detections: Vec<_> = store.detections().await?.into_iter().map(with_media).collect();

    let output = Output {
        mode: store.mode(),
        geofences: &report.geofences,
        alerts: &report.alerts,
        detections,
        dispatch,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
