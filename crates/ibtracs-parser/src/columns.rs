use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::errors::LoadError;

/// Column names written to the processed file, in order.
pub const OUTPUT_COLUMNS: [&str; 8] = [
    "SID", "ISO_TIME", "LAT", "LON", "STAT", "WIND", "SLP", "storm_id",
];

/// Source column names for the seven fields the loader extracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub sid: String,
    pub iso_time: String,
    pub lat: String,
    pub lon: String,
    pub status: String,
    pub wind: String,
    pub pressure: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            sid: "SID".to_string(),
            iso_time: "ISO_TIME".to_string(),
            lat: "LAT".to_string(),
            lon: "LON".to_string(),
            status: "USA_STATUS".to_string(),
            wind: "USA_WIND".to_string(),
            pressure: "USA_PRES".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub sid: usize,
    pub iso_time: usize,
    pub lat: usize,
    pub lon: usize,
    pub status: usize,
    pub wind: usize,
    pub pressure: usize,
}

impl ColumnLayout {
    /// Locates every configured column in the header row. Matching ignores
    /// surrounding whitespace; the first occurrence of a duplicated name wins.
    pub fn resolve(&self, header: &StringRecord) -> Result<ColumnIndices, LoadError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|field| field.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(ColumnIndices {
            sid: find(&self.sid)?,
            iso_time: find(&self.iso_time)?,
            lat: find(&self.lat)?,
            lon: find(&self.lon)?,
            status: find(&self.status)?,
            wind: find(&self.wind)?,
            pressure: find(&self.pressure)?,
        })
    }
}
