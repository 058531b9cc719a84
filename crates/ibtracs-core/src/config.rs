use std::fs;
use std::path::{Path, PathBuf};

use ibtracs_parser::{ColumnLayout, LoaderOptions, DEFAULT_UNITS_ROWS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sequence::SequenceOrder;

pub const DEFAULT_REGION: &str = "NA";
pub const DEFAULT_VERSION: &str = "4r01";
pub const SYNOPTIC_HOURS: [u32; 4] = [0, 6, 12, 18];
pub const DEFAULT_STEP_HOURS: i64 = 6;

const OUTPUT_SUFFIX: &str = "processed_6hrly.statslp3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Everything the pipeline needs to locate, read and write one regional file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub region: String,
    pub version: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub columns: ColumnLayout,
    pub units_rows: usize,
    pub synoptic_hours: Vec<u32>,
    pub step_hours: i64,
    pub sequence_order: SequenceOrder,
    pub write_parquet: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            version: DEFAULT_VERSION.to_string(),
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            columns: ColumnLayout::default(),
            units_rows: DEFAULT_UNITS_ROWS,
            synoptic_hours: SYNOPTIC_HOURS.to_vec(),
            step_hours: DEFAULT_STEP_HOURS,
            sequence_order: SequenceOrder::default(),
            write_parquet: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::Invalid("region must not be empty".into()));
        }
        if self.version.trim().is_empty() {
            return Err(ConfigError::Invalid("version must not be empty".into()));
        }
        if self.synoptic_hours.is_empty() {
            return Err(ConfigError::Invalid(
                "synoptic_hours must list at least one hour".into(),
            ));
        }
        if let Some(hour) = self.synoptic_hours.iter().find(|hour| **hour > 23) {
            return Err(ConfigError::Invalid(format!(
                "synoptic hour {hour} is outside 0..=23"
            )));
        }
        if self.step_hours <= 0 {
            return Err(ConfigError::Invalid(format!(
                "step_hours must be positive, got {}",
                self.step_hours
            )));
        }
        Ok(())
    }

    pub fn file_stem(&self) -> String {
        format!("ibtracs.{}.list.v0{}", self.region, self.version)
    }

    pub fn input_file_name(&self) -> String {
        format!("{}.csv", self.file_stem())
    }

    pub fn output_file_name(&self) -> String {
        format!("{}.{OUTPUT_SUFFIX}.csv", self.file_stem())
    }

    pub fn parquet_file_name(&self) -> String {
        format!("{}.{OUTPUT_SUFFIX}.parquet", self.file_stem())
    }

    pub fn input_path(&self) -> PathBuf {
        self.input_dir.join(self.input_file_name())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_file_name())
    }

    pub fn parquet_path(&self) -> PathBuf {
        self.output_dir.join(self.parquet_file_name())
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            layout: self.columns.clone(),
            units_rows: self.units_rows,
        }
    }

    pub fn step(&self) -> chrono::Duration {
        chrono::Duration::hours(self.step_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_names_match_ibtracs_convention() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_file_name(), "ibtracs.NA.list.v04r01.csv");
        assert_eq!(
            config.output_file_name(),
            "ibtracs.NA.list.v04r01.processed_6hrly.statslp3.csv"
        );
        assert_eq!(
            config.parquet_file_name(),
            "ibtracs.NA.list.v04r01.processed_6hrly.statslp3.parquet"
        );
    }

    #[test]
    fn region_and_version_flow_into_paths() {
        let config = PipelineConfig {
            region: "WP".into(),
            version: "4r00".into(),
            input_dir: PathBuf::from("/data/in"),
            output_dir: PathBuf::from("/data/out"),
            ..PipelineConfig::default()
        };
        assert_eq!(
            config.input_path(),
            PathBuf::from("/data/in/ibtracs.WP.list.v04r00.csv")
        );
        assert_eq!(
            config.output_path(),
            PathBuf::from("/data/out/ibtracs.WP.list.v04r00.processed_6hrly.statslp3.csv")
        );
    }

    #[test]
    fn toml_overrides_only_named_fields() {
        let config = PipelineConfig::from_toml_str(
            r#"
                region = "EP"
                sequence_order = "first_seen"

                [columns]
                status = "WMO_STATUS"
            "#,
        )
        .unwrap();

        assert_eq!(config.region, "EP");
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.sequence_order, SequenceOrder::FirstSeen);
        assert_eq!(config.columns.status, "WMO_STATUS");
        assert_eq!(config.columns.sid, "SID");
        assert_eq!(config.units_rows, 1);
        assert_eq!(config.synoptic_hours, vec![0, 6, 12, 18]);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            PipelineConfig::from_toml_str("region = \"\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PipelineConfig::from_toml_str("synoptic_hours = [0, 24]"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PipelineConfig::from_toml_str("step_hours = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            PipelineConfig::from_toml_str("units_rows = \"one\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
