pub mod columns;
pub mod errors;
pub mod loader;
pub mod model;
pub mod timestamp;

pub use columns::{ColumnIndices, ColumnLayout, OUTPUT_COLUMNS};
pub use errors::{FormatAttempt, LoadError, RowError, TimestampError};
pub use loader::{
    extract_observation, load_observations, load_observations_from_path, LoaderOptions,
    DEFAULT_UNITS_ROWS,
};
pub use model::{LoadedTrack, SkippedRow, TrackObservation};
pub use timestamp::{
    default_formats, parse_timestamp, parse_with_formats, IsoSeconds, TimestampFormat,
    UsMeridiem, UsMinutes,
};
