use ibtracs_parser::TrackObservation;
use polars::prelude::*;

pub const SID: &str = "SID";
pub const ISO_TIME: &str = "ISO_TIME";
pub const LAT: &str = "LAT";
pub const LON: &str = "LON";
pub const STAT: &str = "STAT";
pub const WIND: &str = "WIND";
pub const SLP: &str = "SLP";
pub const STORM_ID: &str = "storm_id";

/// Builds the track table: one row per observation, `ISO_TIME` stored as a
/// naive microsecond datetime.
pub fn build_track_frame(observations: &[TrackObservation]) -> PolarsResult<DataFrame> {
    let len = observations.len();
    let mut sid = Vec::with_capacity(len);
    let mut iso_time = Vec::with_capacity(len);
    let mut lat = Vec::with_capacity(len);
    let mut lon = Vec::with_capacity(len);
    let mut stat = Vec::with_capacity(len);
    let mut wind = Vec::with_capacity(len);
    let mut slp = Vec::with_capacity(len);

    for obs in observations {
        sid.push(obs.sid.as_str());
        iso_time.push(obs.iso_time.and_utc().timestamp_micros());
        lat.push(obs.lat);
        lon.push(obs.lon);
        stat.push(obs.status.as_str());
        wind.push(obs.wind.as_str());
        slp.push(obs.pressure.as_str());
    }

    let iso_series = Series::new(ISO_TIME.into(), iso_time)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    DataFrame::new(vec![
        Series::new(SID.into(), sid).into(),
        iso_series.into(),
        Series::new(LAT.into(), lat).into(),
        Series::new(LON.into(), lon).into(),
        Series::new(STAT.into(), stat).into(),
        Series::new(WIND.into(), wind).into(),
        Series::new(SLP.into(), slp).into(),
    ])
}
