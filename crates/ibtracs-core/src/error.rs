// crates/ibtracs-core/src/error.rs

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load track file: {0}")]
    Load(#[from] ibtracs_parser::LoadError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
