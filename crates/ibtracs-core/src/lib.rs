pub mod config;
pub mod error;
pub mod outputs;
pub mod pipeline;
pub mod sequence;
pub mod synoptic;
pub mod table;
pub mod validation;

pub use config::{ConfigError, PipelineConfig};
pub use error::{PipelineError, Result};
pub use pipeline::{process_observations, run_pipeline, PipelineSummary, ProcessedTrack};
pub use sequence::SequenceOrder;
pub use validation::IrregularStep;
