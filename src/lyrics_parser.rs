use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{LyricLine, flatten_segments};
use crate::tag_tokenizer;
use crate::time_format;

// @module: Tagged LRC document parsing

// @const: Metadata line such as [ar:Artist] or [offset:+100]
static METADATA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[[a-zA-Z]+:").unwrap()
});

/// Result of parsing a whole lyric document
#[derive(Debug, Clone, Default)]
pub struct LyricsDocument {
    /// Lines sorted by time
    pub lines: Vec<LyricLine>,

    /// False when the document held no timestamped line at all
    pub has_lyrics: bool,
}

impl LyricsDocument {
    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there are no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Parse a document and report whether it carried any lyrics
pub fn parse_document(content: &str) -> LyricsDocument {
    let lines = parse(content);
    let has_lyrics = !lines.is_empty();
    if !has_lyrics {
        debug!("Document contains no timestamped lines");
    }
    LyricsDocument { lines, has_lyrics }
}

/// Parse a tagged LRC document into time-ordered lines.
///
/// One line is emitted per timestamp tag, so `[00:00.00][00:05.00]La la`
/// gives two lines sharing the same text. Metadata lines, blank lines and
/// lines without a timestamp contribute nothing. The result is stably
/// sorted, so equal times keep their source order.
pub fn parse(content: &str) -> Vec<LyricLine> {
    let mut lines = Vec::new();
    let mut skipped = 0usize;

    for (line_no, raw_line) in content.lines().enumerate() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if METADATA_REGEX.is_match(trimmed) {
            debug!("Skipping metadata at line {}: {}", line_no + 1, trimmed);
            continue;
        }

        let (stamps, remaining) = split_timestamps(trimmed);
        if stamps.is_empty() {
            skipped += 1;
            debug!("No timestamp at line {}, ignoring: {}", line_no + 1, trimmed);
            continue;
        }

        let segments = tag_tokenizer::tokenize(&remaining);
        let text = flatten_segments(&segments);

        for (time, tag) in stamps {
            lines.push(LyricLine {
                time,
                original_time: tag,
                text: text.clone(),
                segments: segments.clone(),
            });
        }
    }

    lines.sort_by(|a, b| a.time.total_cmp(&b.time));

    if skipped > 0 {
        warn!("Ignored {} line(s) without a timestamp", skipped);
    }

    lines
}

/// Pull every timestamp tag out of a line.
///
/// Returns the `(seconds, tag text)` pairs in order of appearance and the
/// line with those tags removed. Bracket groups that are not timestamps
/// stay in the text.
fn split_timestamps(line: &str) -> (Vec<(f64, String)>, String) {
    let mut stamps = Vec::new();
    let mut remaining = String::with_capacity(line.len());
    let mut pos = 0;

    while let Some(open_offset) = line[pos..].find('[') {
        let open = pos + open_offset;
        let Some(close_offset) = line[open..].find(']') else {
            break;
        };
        let close = open + close_offset;

        // Restart from an inner '[' so "[abc [00:01.00]" still yields the tag
        if let Some(inner_offset) = line[open + 1..close].rfind('[') {
            let inner = open + 1 + inner_offset;
            remaining.push_str(&line[pos..inner]);
            pos = inner;
            continue;
        }

        let tag = &line[open..=close];
        match time_format::parse(tag) {
            Ok(time) => {
                remaining.push_str(&line[pos..open]);
                stamps.push((time, tag.to_string()));
            }
            Err(e) => {
                debug!("Bracket group is not a timestamp ({}), keeping as text", e);
                remaining.push_str(&line[pos..=close]);
            }
        }
        pos = close + 1;
    }

    remaining.push_str(&line[pos..]);
    (stamps, remaining.trim().to_string())
}
