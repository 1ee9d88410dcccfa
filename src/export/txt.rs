//! Plain text rendering.

use crate::export::ExportOptions;
use crate::model::{LyricLine, flatten_segments};
use crate::time_format;

/// Flattened text per line, optionally prefixed with `[mm:ss.cc] `; never tagged
pub fn render(lines: &[&LyricLine], options: &ExportOptions) -> String {
    lines
        .iter()
        .map(|line| {
            let text = flatten_segments(&line.segments);
            if options.include_timestamps {
                format!("{} {}", time_format::format_tag(line.time), text)
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
