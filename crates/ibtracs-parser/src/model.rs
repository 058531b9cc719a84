use std::fmt;

use chrono::NaiveDateTime;

use crate::errors::RowError;

/// One best-track fix as extracted from the source file.
///
/// Status, wind and pressure stay as the raw text so blank cells and
/// dataset sentinels pass through to the output untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackObservation {
    pub sid: String,
    pub iso_time: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    pub status: String,
    pub wind: String,
    pub pressure: String,
}

#[derive(Debug, Clone)]
pub struct SkippedRow {
    /// 1-based line number in the source file, when the reader knows it.
    pub line: Option<u64>,
    pub content: String,
    pub reason: RowError,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line} [{}]: {}", self.content, self.reason),
            None => write!(f, "[{}]: {}", self.content, self.reason),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadedTrack {
    pub observations: Vec<TrackObservation>,
    pub skipped: Vec<SkippedRow>,
    pub units_rows_skipped: usize,
}

impl LoadedTrack {
    pub fn rows_read(&self) -> usize {
        self.observations.len() + self.skipped.len()
    }
}
