use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::alert::Severity;
use crate::models::subscriber::Subscriber;
use crate::processor::annotate::AnnotatedAlert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Sms,
    Voice,
    Push,
}

impl Channel {
    fn sid_prefix(&self) -> &'static str {
        match self {
            Channel::Sms => "SM",
            Channel::Voice => "CA",
            Channel::Push => "PN",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub sid: String,
    pub channel: Channel,
    pub alert_id: String,
    pub subscriber_id: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummary {
    pub alerts_notified: usize,
    pub sms: usize,
    pub voice: usize,
    pub push: usize,
    pub skipped: usize,
    pub receipts: Vec<Receipt>,
}

impl DispatchSummary {
    fn record(&mut self, receipt: Receipt) {
        match receipt.channel {
            Channel::Sms => self.sms += 1,
            Channel::Voice => self.voice += 1,
            Channel::Push => self.push += 1,
        }
        self.receipts.push(receipt);
    }
}

/// Mock messaging gateway. Nothing leaves the process; every delivery is
/// logged and acknowledged with a gateway-style sid.
#[derive(Debug, Default)]
pub struct Dispatcher;

impl Dispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Notifies the recipients of every unacknowledged live alert.
    pub fn dispatch(&self, alerts: &[AnnotatedAlert], subscribers: &[Subscriber]) -> DispatchSummary {
        let roster: HashMap<&str, &Subscriber> =
            subscribers.iter().map(|s| (s.id.as_str(), s)).collect();
        let mut summary = DispatchSummary::default();

        for annotated in alerts {
            let alert = &annotated.alert;
            if alert.acknowledged || !alert.is_live() {
                continue;
            }
            summary.alerts_notified += 1;

            let body = format!(
                "[{}] {} - {}: {}",
                alert.severity.as_str().to_uppercase(),
                alert.alert_type.label(),
                alert.title,
                alert.message
            );

            for recipient in &annotated.recipients {
                let Some(subscriber) = roster.get(recipient.id.as_str()) else {
                    debug!("Recipient {} of alert {} is not on the roster", recipient.id, alert.id);
                    summary.skipped += 1;
                    continue;
                };
                let prefs = subscriber.alert_prefs;
                if !subscriber.alerts_enabled || !(prefs.sms || prefs.push) {
                    debug!("Subscriber {} has alerts disabled", subscriber.id);
                    summary.skipped += 1;
                    continue;
                }

                if prefs.sms {
                    summary.record(self.send(Channel::Sms, &alert.id, subscriber, &body));
                    if alert.severity == Severity::Critical {
                        let script = format!("Critical bushfire alert. {}", alert.title);
                        summary.record(self.send(Channel::Voice, &alert.id, subscriber, &script));
                    }
                }
                if prefs.push {
                    summary.record(self.send(Channel::Push, &alert.id, subscriber, &alert.title));
                }
            }
        }

        if summary.skipped > 0 {
            warn!("Skipped {} recipients without a reachable channel", summary.skipped);
        }
        info!(
            "Dispatched {} alerts: {} sms, {} voice, {} push",
            summary.alerts_notified, summary.sms, summary.voice, summary.push
        );
        summary
    }

    fn send(&self, channel: Channel, alert_id: &str, subscriber: &Subscriber, body: &str) -> Receipt {
        let sid = format!("{}{}", channel.sid_prefix(), Uuid::new_v4().simple());
        match channel {
            Channel::Sms => info!("[sms] {} -> {}: {}", sid, subscriber.phone, body),
            Channel::Voice => info!("[voice] {} calling {}: {}", sid, subscriber.phone, body),
            Channel::Push => info!("[push] {} -> {}: {}", sid, subscriber.id, body),
        }
        Receipt {
            sid,
            channel,
            alert_id: alert_id.to_string(),
            subscriber_id: subscriber.id.clone(),
            body: body.to_string(),
        }
    }
}
