//! LRC and enhanced LRC rendering.

use crate::export::ExportOptions;
use crate::model::{LyricLine, flatten_segments};
use crate::time_format;

/// `[mm:ss.cc]text` per line, singer tags stripped
pub fn render(lines: &[&LyricLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "{}{}",
                time_format::format_tag(line.time),
                flatten_segments(&line.segments)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Like [`render`] but re-emits `@id@` / `@id1,id2@` tags per segment.
///
/// Falls back to plain LRC when singer tags are disabled.
pub fn render_enhanced(lines: &[&LyricLine], options: &ExportOptions) -> String {
    if !options.include_singer_tags {
        return render(lines);
    }

    lines
        .iter()
        .map(|line| format!("{}{}", time_format::format_tag(line.time), line.tagged_text()))
        .collect::<Vec<_>>()
        .join("\n")
}
