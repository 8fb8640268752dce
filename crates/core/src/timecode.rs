//! Timecode parsing and display formatting.
//!
//! Accepted input forms, tried in order after trimming:
//!
//! - `hh:mm:ss:ff` -- frames are divided by the frame rate (30 fps unless
//!   the caller supplies another [`FrameRate`])
//! - `hh:mm:ss` -- the seconds field may carry a fraction (`hh:mm:ss.mmm`),
//!   which is the form [`format_timecode`] produces
//! - plain decimal seconds (`12.5`)
//!
//! [`parse_timecode`] is lenient: anything it cannot read becomes `0.0`.
//! [`try_parse_timecode`] reports why instead.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Frame rate assumed for `hh:mm:ss:ff` timecodes.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

// ---------------------------------------------------------------------------
// Frame rate
// ---------------------------------------------------------------------------

/// Frames per second used to convert the frame field of a timecode.
///
/// Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate(f64);

impl FrameRate {
    pub fn new(fps: f64) -> Result<Self, CoreError> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(CoreError::Validation(format!(
                "Frame rate must be a positive number, got {fps}"
            )));
        }
        Ok(Self(fps))
    }

    /// Parse a user-supplied frame rate such as `"25"` or `"29.97"`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let fps: f64 = s
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("Invalid frame rate: '{s}'")))?;
        Self::new(fps)
    }

    pub fn fps(self) -> f64 {
        self.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(DEFAULT_FRAME_RATE)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Why a timecode could not be read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimecodeError {
    #[error("timecode is empty")]
    Empty,

    #[error("expected 3 or 4 colon-separated fields, got {0}")]
    FieldCount(usize),

    #[error("invalid timecode field '{0}'")]
    InvalidField(String),

    #[error("invalid seconds value '{0}'")]
    InvalidSeconds(String),

    /// A well-formed timecode with a leading `-`; carries the signed value.
    #[error("timecode is negative ({0} seconds)")]
    Negative(f64),
}

/// Parse a timecode into elapsed seconds, reporting the failure reason.
///
/// The result is always finite and non-negative. A leading `-` on an
/// otherwise valid timecode yields [`TimecodeError::Negative`] with the
/// signed value; `-0` reads as zero.
pub fn try_parse_timecode(input: &str, frame_rate: FrameRate) -> Result<f64, TimecodeError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(TimecodeError::Empty);
    }

    if let Some(magnitude) = text.strip_prefix('-') {
        let value = parse_unsigned(magnitude, frame_rate)?;
        return if value == 0.0 {
            Ok(0.0)
        } else {
            Err(TimecodeError::Negative(-value))
        };
    }

    parse_unsigned(text, frame_rate)
}

/// Parse a timecode with no sign.
fn parse_unsigned(text: &str, frame_rate: FrameRate) -> Result<f64, TimecodeError> {
    if !text.contains(':') {
        return parse_seconds(text);
    }

    let fields: Vec<&str> = text.split(':').collect();
    match fields.as_slice() {
        [hours, minutes, seconds, frames] => {
            let base = clock_seconds(parse_field(hours)?, parse_field(minutes)?);
            let seconds = parse_field(seconds)?;
            let frames = parse_field(frames)?;
            Ok(base.saturating_add(seconds) as f64 + frames as f64 / frame_rate.fps())
        }
        [hours, minutes, seconds] => {
            let base = clock_seconds(parse_field(hours)?, parse_field(minutes)?);
            Ok(base as f64 + parse_seconds(seconds)?)
        }
        other => Err(TimecodeError::FieldCount(other.len())),
    }
}

/// Parse a timecode at the default 30 fps, returning `0.0` when unreadable.
pub fn parse_timecode(input: &str) -> f64 {
    parse_timecode_at(input, FrameRate::default())
}

/// Parse a timecode at the given frame rate, returning `0.0` when unreadable
/// or negative.
pub fn parse_timecode_at(input: &str, frame_rate: FrameRate) -> f64 {
    try_parse_timecode(input, frame_rate).unwrap_or(0.0)
}

fn clock_seconds(hours: u64, minutes: u64) -> u64 {
    hours
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
}

fn parse_field(field: &str) -> Result<u64, TimecodeError> {
    field
        .trim()
        .parse::<u64>()
        .map_err(|_| TimecodeError::InvalidField(field.to_string()))
}

fn parse_seconds(field: &str) -> Result<f64, TimecodeError> {
    match field.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(TimecodeError::InvalidSeconds(field.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format elapsed seconds as `HH:MM:SS.mmm`.
///
/// Hours widen past two digits when needed. Negative and non-finite input
/// is clamped to zero.
pub fn format_timecode(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };

    // Round once at millisecond precision so 59.9996 carries into the minute.
    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let millis = total_millis % 60_000;

    format!(
        "{hours:02}:{minutes:02}:{:02}.{:03}",
        millis / 1000,
        millis % 1000
    )
}
