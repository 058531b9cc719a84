use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::io::parquet::write::{ParquetCompression, ParquetWriter, StatisticsOptions};
use polars::prelude::*;
use tracing::info;

use crate::error::{PipelineError, Result};

pub const OUTPUT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the processed track table as CSV with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = create_output(path)?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_header(true)
        .with_datetime_format(Some(OUTPUT_DATETIME_FORMAT.to_string()))
        .finish(df)
        .map_err(|err| write_error(path, err))?;
    writer.flush().map_err(|err| write_error(path, err))?;
    info!(path = %path.display(), rows = df.height(), "wrote processed CSV");
    Ok(())
}

/// Writes a zstd-compressed parquet copy of the processed table.
pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = create_output(path)?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .with_statistics(StatisticsOptions::default())
        .finish(df)
        .map_err(|err| write_error(path, err))?;
    info!(path = %path.display(), rows = df.height(), "wrote processed parquet");
    Ok(())
}

fn create_output(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    File::create(path).map_err(|err| write_error(path, err))
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::Write {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{assign_storm_ids, SequenceOrder};
    use crate::table::build_track_frame;
    use crate::table::test_support::{at, obs};

    #[test]
    fn csv_has_header_and_formatted_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let df = build_track_frame(&[obs("A", at(1, 6))]).unwrap();
        let mut df = assign_storm_ids(&df, SequenceOrder::SortedId).unwrap();
        write_csv(&mut df, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        let header = ibtracs_parser::OUTPUT_COLUMNS.join(",");
        assert_eq!(lines.next(), Some(header.as_str()));
        let row = lines.next().unwrap();
        assert!(row.starts_with("A,2020-08-01 06:00:00,"), "row was {row}");
        assert!(row.ends_with(",TS,45,998,1"), "row was {row}");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        let mut df = build_track_frame(&[obs("A", at(1, 0))]).unwrap();
        write_csv(&mut df, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn parquet_round_trips_row_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.parquet");
        let mut df = build_track_frame(&[obs("A", at(1, 0)), obs("A", at(1, 6))]).unwrap();
        write_parquet(&mut df, &path).unwrap();

        let file = File::open(&path).unwrap();
        let read = ParquetReader::new(file).finish().unwrap();
        assert_eq!(read.height(), 2);
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let mut df = build_track_frame(&[obs("A", at(1, 0))]).unwrap();
        let result = write_csv(&mut df, &blocker.join("out.csv"));
        assert!(result.is_err());
    }
}
