use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::models::alert::Alert;

/// Look-back window for alert listings. `Active` is not a time range: it
/// keeps live alerts of any age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlertWindow {
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "6hours")]
    SixHours,
    #[serde(rename = "24hours")]
    TwentyFourHours,
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "12months")]
    TwelveMonths,
    #[serde(rename = "active")]
    Active,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl AlertWindow {
    pub fn duration(&self) -> Option<Duration> {
        match self {
            AlertWindow::FifteenMinutes => Some(Duration::minutes(15)),
            AlertWindow::OneHour => Some(Duration::hours(1)),
            AlertWindow::SixHours => Some(Duration::hours(6)),
            AlertWindow::TwentyFourHours => Some(Duration::hours(24)),
            AlertWindow::SevenDays => Some(Duration::days(7)),
            AlertWindow::ThirtyDays => Some(Duration::days(30)),
            AlertWindow::ThreeMonths => Some(Duration::days(90)),
            AlertWindow::SixMonths => Some(Duration::days(180)),
            AlertWindow::TwelveMonths => Some(Duration::days(365)),
            AlertWindow::Active | AlertWindow::All => None,
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.duration() {
            Some(d) => timestamp >= now - d,
            None => true,
        }
    }

    pub fn admits(&self, alert: &Alert, now: DateTime<Utc>) -> bool {
        match self {
            AlertWindow::Active => alert.is_live(),
            _ => self.contains(alert.timestamp, now),
        }
    }
}

impl FromStr for AlertWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let window = match s.trim() {
            "15min" => AlertWindow::FifteenMinutes,
            "1hour" => AlertWindow::OneHour,
            "6hours" => AlertWindow::SixHours,
            "24hours" => AlertWindow::TwentyFourHours,
            "7days" => AlertWindow::SevenDays,
            "30days" => AlertWindow::ThirtyDays,
            "3months" => AlertWindow::ThreeMonths,
            "6months" => AlertWindow::SixMonths,
            "12months" => AlertWindow::TwelveMonths,
            "active" => AlertWindow::Active,
            "all" | "" => AlertWindow::All,
            other => anyhow::bail!("unknown alert time filter '{}'", other),
        };
        Ok(window)
    }
}
