use chrono::{NaiveTime, Timelike};

use crate::error::TimelineError;

const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.f";

/// Parses a period-local `HH:MM:SS.mmm` clock reading into seconds since
/// `00:00:00.000` of that period. Fields are zero-padded and the fractional
/// part (1 to 9 digits) is mandatory.
pub fn parse(raw: &str) -> Result<f64, TimelineError> {
    if !has_clock_shape(raw) {
        return Err(TimelineError::MalformedTimestamp(raw.to_string()));
    }

    let time = NaiveTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| TimelineError::MalformedTimestamp(raw.to_string()))?;
    let whole = f64::from(time.num_seconds_from_midnight());
    let nanos = f64::from(time.nanosecond()) / 1_000_000_000.0;
    Ok(whole + nanos)
}

fn has_clock_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if !(10..=18).contains(&bytes.len()) {
        return false;
    }
    let layout_ok = bytes.iter().enumerate().all(|(idx, b)| match idx {
        2 | 5 => *b == b':',
        8 => *b == b'.',
        _ => b.is_ascii_digit(),
    });
    // chrono would otherwise accept a leap second
    layout_ok && bytes[6] < b'6'
}

/// Like [`parse`], but an absent value is reported as `MissingTimestamp`.
pub fn parse_opt(raw: Option<&str>) -> Result<f64, TimelineError> {
    match raw {
        Some(value) => parse(value),
        None => Err(TimelineError::MissingTimestamp),
    }
}

/// Renders seconds back into `HH:MM:SS.mmm`. Negative input renders as zero.
pub fn render(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// Rounds to two decimal places; only applied when reporting.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
