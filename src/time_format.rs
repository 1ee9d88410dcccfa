use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FormatError;

// @module: Timestamp conversion between LRC/SRT text and seconds

// @const: LRC timestamp body (without brackets)
static LRC_TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?:\.(\d{2}))?$").unwrap()
});

/// Smallest time step representable in LRC output
pub const CENTISECOND: f64 = 0.01;

/// Parse an LRC timestamp into seconds.
///
/// Accepts `m:ss`, `mm:ss`, `m:ss.cc` and `mm:ss.cc`, optionally wrapped in a
/// single pair of square brackets. Centiseconds default to `00`.
pub fn parse(text: &str) -> Result<f64, FormatError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim();

    if body.starts_with('-') {
        return Err(FormatError::Negative(text.to_string()));
    }

    let caps = LRC_TIME_REGEX
        .captures(body)
        .ok_or_else(|| FormatError::Malformed(text.to_string()))?;

    let field = |idx: usize| -> Result<u64, FormatError> {
        match caps.get(idx) {
            Some(m) => m
                .as_str()
                .parse::<u64>()
                .map_err(|_| FormatError::Malformed(text.to_string())),
            None => Ok(0),
        }
    };

    let minutes = field(1)?;
    let seconds = field(2)?;
    let centis = field(3)?;

    if seconds >= 60 {
        return Err(FormatError::SecondsOutOfRange(text.to_string()));
    }

    let total_centis = (minutes * 60 + seconds) * 100 + centis;
    Ok(total_centis as f64 / 100.0)
}

/// Format seconds as the canonical `mm:ss.cc` form.
///
/// Normalizing: `3:07.4`-style input always comes back as `03:07.40`.
/// Negative and non-finite values format as `00:00.00`.
pub fn format(seconds: f64) -> String {
    let total = to_centis(seconds);
    let minutes = total / 6_000;
    let secs = (total % 6_000) / 100;
    let centis = total % 100;

    format!("{:02}:{:02}.{:02}", minutes, secs, centis)
}

/// Format seconds as a bracketed LRC tag, e.g. `[01:07.40]`
pub fn format_tag(seconds: f64) -> String {
    format!("[{}]", format(seconds))
}

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_srt(seconds: f64) -> String {
    let ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Convert seconds to a whole number of centiseconds, rounding to nearest
pub fn to_centis(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 100.0).round() as u64
}

/// Snap seconds onto the centisecond grid
pub fn round_to_centis(seconds: f64) -> f64 {
    to_centis(seconds) as f64 / 100.0
}

/// Parse a playback position typed on the command line.
///
/// Accepts either an LRC timestamp (`01:07.40`) or plain seconds (`67.4`).
pub fn parse_playback_time(text: &str) -> Result<f64, FormatError> {
    let trimmed = text.trim();
    if trimmed.contains(':') {
        return parse(trimmed);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(value) if value < 0.0 => Err(FormatError::Negative(text.to_string())),
        _ => Err(FormatError::Malformed(text.to_string())),
    }
}
