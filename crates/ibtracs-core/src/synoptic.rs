use chrono::{DateTime, Timelike};
use polars::prelude::*;

use crate::table::ISO_TIME;

/// Keeps rows whose `ISO_TIME` hour-of-day is one of `hours`. Other rows,
/// and rows with a null timestamp, are dropped without logging.
pub fn filter_synoptic(df: &DataFrame, hours: &[u32]) -> PolarsResult<DataFrame> {
    let times = df.column(ISO_TIME)?.datetime()?;

    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let hour = times
            .get(idx)
            .and_then(DateTime::from_timestamp_micros)
            .map(|dt| dt.hour());
        keep.push(hour.is_some_and(|h| hours.contains(&h)));
    }

    let mask = BooleanChunked::from_slice("synoptic".into(), &keep);
    df.filter(&mask)
}
