use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::table::{ISO_TIME, SID, STORM_ID};

/// A gap between consecutive fixes of one storm that differs from the
/// expected step. Reported only; the rows are left in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrregularStep {
    pub storm_id: u32,
    pub sid: String,
    /// Position of the later fix in the sorted table.
    pub row_index: usize,
    pub previous: NaiveDateTime,
    pub current: NaiveDateTime,
    pub delta_seconds: i64,
}

impl IrregularStep {
    pub fn delta(&self) -> Duration {
        Duration::seconds(self.delta_seconds)
    }
}

impl fmt::Display for IrregularStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "storm {} ({}) row {}: {} -> {} is {}",
            self.storm_id,
            self.sid,
            self.row_index,
            self.previous,
            self.current,
            format_delta(self.delta())
        )
    }
}

/// Walks a frame already sorted by (`storm_id`, `ISO_TIME`) and reports every
/// consecutive same-storm pair whose spacing is not exactly `step`.
pub fn find_irregular_steps(df: &DataFrame, step: Duration) -> PolarsResult<Vec<IrregularStep>> {
    let storm_ids = df.column(STORM_ID)?.u32()?;
    let sids = df.column(SID)?.str()?;
    let times = df.column(ISO_TIME)?.datetime()?;
    let expected = step.num_microseconds().unwrap_or(i64::MAX);

    let mut irregular = Vec::new();
    for idx in 1..df.height() {
        let (Some(prev_id), Some(curr_id)) = (storm_ids.get(idx - 1), storm_ids.get(idx)) else {
            continue;
        };
        if prev_id != curr_id {
            continue;
        }
        let (Some(prev_ts), Some(curr_ts)) = (times.get(idx - 1), times.get(idx)) else {
            continue;
        };

        let delta = curr_ts - prev_ts;
        if delta == expected {
            continue;
        }

        let (Some(previous), Some(current)) = (naive_from_micros(prev_ts), naive_from_micros(curr_ts))
        else {
            continue;
        };
        let step_found = IrregularStep {
            storm_id: curr_id,
            sid: sids.get(idx).unwrap_or_default().to_string(),
            row_index: idx,
            previous,
            current,
            delta_seconds: delta / 1_000_000,
        };
        warn!(
            storm_id = step_found.storm_id,
            sid = %step_found.sid,
            row = step_found.row_index,
            "Storm {} has irregular time step at row {}: {} (expected {})",
            step_found.storm_id,
            step_found.row_index,
            format_delta(step_found.delta()),
            format_delta(step)
        );
        irregular.push(step_found);
    }

    Ok(irregular)
}

fn naive_from_micros(micros: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
}

/// Renders a duration as `12h`, `1h 30m`, `-6h`, `0h`.
pub fn format_delta(delta: Duration) -> String {
    let sign = if delta < Duration::zero() { "-" } else { "" };
    let total = delta.num_seconds().abs();
    let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if seconds > 0 {
        parts.push(format!("{seconds}s"));
    }
    if parts.is_empty() {
        return "0h".to_string();
    }
    format!("{sign}{}", parts.join(" "))
}
