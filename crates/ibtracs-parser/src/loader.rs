use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::columns::{ColumnIndices, ColumnLayout};
use crate::errors::{LoadError, RowError};
use crate::model::{LoadedTrack, SkippedRow, TrackObservation};
use crate::timestamp::parse_timestamp;

/// IBTrACS ships a single row of units directly beneath the column names.
pub const DEFAULT_UNITS_ROWS: usize = 1;

#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub layout: ColumnLayout,
    /// Rows between the header and the first data row that are discarded unread.
    pub units_rows: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            units_rows: DEFAULT_UNITS_ROWS,
        }
    }
}

pub fn load_observations_from_path(
    path: &Path,
    options: &LoaderOptions,
) -> Result<LoadedTrack, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading track file");
    load_observations(BufReader::new(file), options)
}

pub fn load_observations<R: Read>(
    reader: R,
    options: &LoaderOptions,
) -> Result<LoadedTrack, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = csv_reader
        .headers()
        .map_err(|source| LoadError::Header { source })?
        .clone();
    let indices = options.layout.resolve(&header)?;

    let mut records = csv_reader.records();
    for _ in 0..options.units_rows {
        match records.next() {
            None => {
                return Err(LoadError::MissingUnitsRow {
                    expected: options.units_rows,
                })
            }
            Some(Err(source)) if source.is_io_error() => return Err(LoadError::Io { source }),
            Some(_) => {}
        }
    }

    let mut loaded = LoadedTrack {
        units_rows_skipped: options.units_rows,
        ..LoadedTrack::default()
    };

    for result in records {
        match result {
            Ok(record) => match extract_observation(&record, &indices, &options.layout) {
                Ok(observation) => loaded.observations.push(observation),
                Err(reason) => {
                    let skipped = SkippedRow {
                        line: record.position().map(|pos| pos.line()),
                        content: record.iter().collect::<Vec<_>>().join(","),
                        reason,
                    };
                    warn!("Skipping row due to error: {skipped}");
                    loaded.skipped.push(skipped);
                }
            },
            Err(source) if source.is_io_error() => return Err(LoadError::Io { source }),
            Err(err) => {
                let skipped = SkippedRow {
                    line: err.position().map(|pos| pos.line()),
                    content: String::new(),
                    reason: RowError::Malformed {
                        message: err.to_string(),
                    },
                };
                warn!("Skipping row due to error: {skipped}");
                loaded.skipped.push(skipped);
            }
        }
    }

    debug!(
        kept = loaded.observations.len(),
        skipped = loaded.skipped.len(),
        "finished reading track rows"
    );
    Ok(loaded)
}

pub fn extract_observation(
    record: &StringRecord,
    indices: &ColumnIndices,
    layout: &ColumnLayout,
) -> Result<TrackObservation, RowError> {
    let sid = required_field(record, indices.sid, &layout.sid)?;
    if sid.trim().is_empty() {
        return Err(RowError::MissingField {
            column: layout.sid.clone(),
        });
    }

    let iso_time = parse_timestamp(required_field(record, indices.iso_time, &layout.iso_time)?)?;
    let lat = parse_coordinate(required_field(record, indices.lat, &layout.lat)?, &layout.lat)?;
    let lon = parse_coordinate(required_field(record, indices.lon, &layout.lon)?, &layout.lon)?;

    Ok(TrackObservation {
        sid: sid.to_string(),
        iso_time,
        lat,
        lon,
        status: required_field(record, indices.status, &layout.status)?.to_string(),
        wind: required_field(record, indices.wind, &layout.wind)?.to_string(),
        pressure: required_field(record, indices.pressure, &layout.pressure)?.to_string(),
    })
}

fn required_field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &str,
) -> Result<&'r str, RowError> {
    record.get(index).ok_or_else(|| RowError::MissingField {
        column: column.to_string(),
    })
}

fn parse_coordinate(value: &str, column: &str) -> Result<f64, RowError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| RowError::InvalidCoordinate {
            column: column.to_string(),
            value: value.to_string(),
        })
}
