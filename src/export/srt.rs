//! SRT rendering.

use std::fmt;

use crate::model::{LyricLine, flatten_segments};
use crate::time_format;

/// Display time given to the last line, in seconds
pub const LAST_LINE_DURATION_SECS: f64 = 3.0;

/// One numbered subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SrtEntry {
    /// 1-based sequence number
    pub seq_num: usize,
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    /// Flattened text
    pub text: String,
}

impl fmt::Display for SrtEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} --> {}",
            time_format::format_srt(self.start),
            time_format::format_srt(self.end)
        )?;
        writeln!(f, "{}", self.text)
    }
}

/// Build entries: each line ends where the next begins, the last after 3s
pub fn entries(lines: &[&LyricLine]) -> Vec<SrtEntry> {
    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let end = lines
                .get(index + 1)
                .map_or(line.time + LAST_LINE_DURATION_SECS, |next| next.time);
            SrtEntry {
                seq_num: index + 1,
                start: line.time,
                end,
                text: flatten_segments(&line.segments),
            }
        })
        .collect()
}

/// Entries separated by a blank line
pub fn render(lines: &[&LyricLine]) -> String {
    entries(lines)
        .iter()
        .map(SrtEntry::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
