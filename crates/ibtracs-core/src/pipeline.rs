use std::path::PathBuf;

use ibtracs_parser::{load_observations_from_path, LoadedTrack, TrackObservation};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::outputs::{write_csv, write_parquet};
use crate::sequence::{assign_storm_ids, sort_by_storm_and_time, storm_count};
use crate::synoptic::filter_synoptic;
use crate::table::build_track_frame;
use crate::validation::{find_irregular_steps, IrregularStep};

/// Result of the in-memory stages, before anything is written.
#[derive(Debug, Clone)]
pub struct ProcessedTrack {
    pub dataframe: DataFrame,
    pub off_synoptic_rows: usize,
    pub storm_count: usize,
    pub irregular_steps: Vec<IrregularStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub parquet_path: Option<PathBuf>,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_off_synoptic: usize,
    pub rows_written: usize,
    pub storm_count: usize,
    pub irregular_step_count: usize,
    pub irregular_steps: Vec<IrregularStep>,
}

impl PipelineSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Filter, number, sort and validate a set of loaded observations.
pub fn process_observations(
    observations: &[TrackObservation],
    config: &PipelineConfig,
) -> Result<ProcessedTrack> {
    let table = build_track_frame(observations)?;
    let synoptic = filter_synoptic(&table, &config.synoptic_hours)?;
    let off_synoptic_rows = table.height() - synoptic.height();

    let sequenced = assign_storm_ids(&synoptic, config.sequence_order)?;
    let sorted = sort_by_storm_and_time(&sequenced)?;
    let irregular_steps = find_irregular_steps(&sorted, config.step())?;
    let storm_count = storm_count(&sorted)?;

    Ok(ProcessedTrack {
        dataframe: sorted,
        off_synoptic_rows,
        storm_count,
        irregular_steps,
    })
}

/// Runs one region end to end: read, process, write.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary> {
    config.validate()?;

    let input_path = config.input_path();
    let output_path = config.output_path();
    info!(
        region = %config.region,
        version = %config.version,
        input = %input_path.display(),
        "processing track file"
    );

    let loaded: LoadedTrack = load_observations_from_path(&input_path, &config.loader_options())?;
    if !loaded.skipped.is_empty() {
        warn!(skipped = loaded.skipped.len(), "rows skipped while loading");
    }

    let mut processed = process_observations(&loaded.observations, config)?;
    write_csv(&mut processed.dataframe, &output_path)?;

    let parquet_path = if config.write_parquet {
        let path = config.parquet_path();
        write_parquet(&mut processed.dataframe, &path)?;
        Some(path)
    } else {
        None
    };

    let summary = PipelineSummary {
        input_path,
        output_path,
        parquet_path,
        rows_read: loaded.rows_read(),
        rows_skipped: loaded.skipped.len(),
        rows_off_synoptic: processed.off_synoptic_rows,
        rows_written: processed.dataframe.height(),
        storm_count: processed.storm_count,
        irregular_step_count: processed.irregular_steps.len(),
        irregular_steps: processed.irregular_steps,
    };

    info!(
        rows_read = summary.rows_read,
        rows_skipped = summary.rows_skipped,
        rows_off_synoptic = summary.rows_off_synoptic,
        rows_written = summary.rows_written,
        storms = summary.storm_count,
        irregular_steps = summary.irregular_step_count,
        "pipeline complete"
    );

    Ok(summary)
}
