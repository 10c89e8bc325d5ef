//! Rate-limit usage from a snapshot of the usage API response.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Result;
use crate::model::usage::{session_window, weekly_window};
use crate::model::UsageWindow;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UsageResponse {
    five_hour: Option<UsagePeriod>,
    seven_day: Option<UsagePeriod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UsagePeriod {
    utilization: f64,
    resets_at: Option<String>,
}

/// Session (five hour) and weekly windows. Either may be unfetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageSnapshot {
    pub session: UsageWindow,
    pub weekly: UsageWindow,
}

impl Default for UsageSnapshot {
    fn default() -> Self {
        Self {
            session: UsageWindow::unfetched(session_window()),
            weekly: UsageWindow::unfetched(weekly_window()),
        }
    }
}

pub fn read_snapshot(path: &Path) -> Result<UsageSnapshot> {
    let contents = std::fs::read_to_string(path)?;
    parse_snapshot(&contents)
}

pub fn parse_snapshot(json: &str) -> Result<UsageSnapshot> {
    let response: UsageResponse = serde_json::from_str(json)?;
    let session = response.five_hour.unwrap_or_default();
    let weekly = response.seven_day.unwrap_or_default();
    Ok(UsageSnapshot {
        session: UsageWindow::session(truncate(session.utilization), parse_reset(&session)),
        weekly: UsageWindow::weekly(truncate(weekly.utilization), parse_reset(&weekly)),
    })
}

/// Float utilisation truncated toward zero. Clamping happens in the model.
fn truncate(utilization: f64) -> i64 {
    utilization as i64
}

fn parse_reset(period: &UsagePeriod) -> Option<DateTime<Utc>> {
    let raw = period.resets_at.as_deref()?;
    parse_timestamp(raw)
        .map_err(|e| tracing::debug!(value = raw, error = %e, "unparseable resets_at"))
        .ok()
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}
