use chrono::NaiveDateTime;

use crate::errors::{FormatAttempt, TimestampError};

pub trait TimestampFormat {
    fn name(&self) -> &'static str;
    fn pattern(&self) -> &'static str;

    fn parse(&self, value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(value, self.pattern())
    }
}

/// `2024-11-17 15:00:00`
pub struct IsoSeconds;

/// `11/17/2024  3:00:00 PM`
pub struct UsMeridiem;

/// `9/30/2024 6:00`
pub struct UsMinutes;

impl TimestampFormat for IsoSeconds {
    fn name(&self) -> &'static str {
        "ISO_SECONDS"
    }

    fn pattern(&self) -> &'static str {
        "%Y-%m-%d %H:%M:%S"
    }
}

impl TimestampFormat for UsMeridiem {
    fn name(&self) -> &'static str {
        "US_MERIDIEM"
    }

    fn pattern(&self) -> &'static str {
        "%m/%d/%Y %I:%M:%S %p"
    }
}

impl TimestampFormat for UsMinutes {
    fn name(&self) -> &'static str {
        "US_MINUTES"
    }

    fn pattern(&self) -> &'static str {
        "%m/%d/%Y %H:%M"
    }
}

/// The formats tried by [`parse_timestamp`], in order.
pub fn default_formats() -> [&'static dyn TimestampFormat; 3] {
    [&IsoSeconds, &UsMeridiem, &UsMinutes]
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    parse_with_formats(value, &default_formats())
}

pub fn parse_with_formats(
    value: &str,
    formats: &[&dyn TimestampFormat],
) -> Result<NaiveDateTime, TimestampError> {
    let trimmed = value.trim();
    // Exported sheets sometimes pad the hour with an extra space.
    let normalized = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut attempts = Vec::with_capacity(formats.len());

    for format in formats {
        match format.parse(&normalized) {
            Ok(parsed) => return Ok(parsed),
            Err(err) => attempts.push(FormatAttempt::new(format.name(), err.to_string())),
        }
    }

    Err(TimestampError::Unrecognized {
        value: trimmed.to_string(),
        attempts,
    })
}
