/*!
 * Lyric data model.
 *
 * - `Segment`: a run of a line's text, optionally attributed to singers
 * - `LyricLine`: one timestamped line with its segments
 * - `EditableLine`: a line plus the editor state (id, selection, draft flag)
 */

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tag_tokenizer;
use crate::time_format;

/// A contiguous run of lyric text, optionally attributed to singers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Display text, trimmed
    pub text: String,

    /// Singer ids in tag order; empty means untagged
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub singers: Vec<String>,

    /// Sung by several singers at once (rendered as a blend)
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_blend: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Segment {
    /// Untagged segment
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            singers: Vec::new(),
            is_blend: false,
        }
    }

    /// Segment attributed to one or more singers.
    ///
    /// `is_blend` is derived from the singer count.
    pub fn tagged(text: impl Into<String>, singers: Vec<String>) -> Self {
        let is_blend = singers.len() > 1;
        Self {
            text: text.into(),
            singers,
            is_blend,
        }
    }

    /// Primary singer, i.e. the first listed one
    pub fn primary_singer(&self) -> Option<&str> {
        self.singers.first().map(String::as_str)
    }

    /// Whether the segment carries no singer tag
    pub fn is_untagged(&self) -> bool {
        self.singers.is_empty()
    }

    /// Serialize back to tagged form: `@a@text`, `@a,b@text` or bare text
    pub fn to_tagged_string(&self) -> String {
        if self.singers.is_empty() {
            self.text.clone()
        } else {
            format!("@{}@{}", self.singers.join(","), self.text)
        }
    }
}

/// Canonical display text of a segment list: texts space-joined, trimmed
pub fn flatten_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Anything positioned on the playback timeline
pub trait Timed {
    /// Position in seconds
    fn time(&self) -> f64;
}

/// One timestamped lyric line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Start time in seconds
    pub time: f64,

    /// Timestamp tag as it appeared in the source, or the canonical tag after a re-time
    pub original_time: String,

    /// Flattened display text of `segments`
    pub text: String,

    /// Ordered text segments
    pub segments: Vec<Segment>,
}

impl LyricLine {
    /// Build a line from segments; text and time tag are derived
    pub fn new(time: f64, segments: Vec<Segment>) -> Self {
        let time = time.max(0.0);
        Self {
            time,
            original_time: time_format::format_tag(time),
            text: flatten_segments(&segments),
            segments,
        }
    }

    /// Build a line from raw tagged text such as `@kaho@Hello`
    pub fn from_raw(time: f64, raw_text: &str) -> Self {
        Self::new(time, tag_tokenizer::tokenize(raw_text))
    }

    /// Replace the segments, keeping the text in sync
    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.text = flatten_segments(&segments);
        self.segments = segments;
    }

    /// Move the line, refreshing the time tag
    pub(crate) fn set_time(&mut self, time: f64) {
        self.time = time;
        self.original_time = time_format::format_tag(time);
    }

    /// Text re-serialized with singer tags
    pub fn tagged_text(&self) -> String {
        self.segments
            .iter()
            .map(Segment::to_tagged_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether `text` matches the flattened segments
    pub fn is_consistent(&self) -> bool {
        self.text == flatten_segments(&self.segments)
    }
}

impl Timed for LyricLine {
    fn time(&self) -> f64 {
        self.time
    }
}

impl fmt::Display for LyricLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", time_format::format_tag(self.time), self.text)
    }
}

/// Stable identifier of an editable line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Fresh random id
    pub fn new() -> Self {
        Self(format!("line_{}", Uuid::new_v4().simple()))
    }

    /// Borrow the id text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for LineId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lyric line inside an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableLine {
    /// Stable id
    pub id: LineId,

    /// The line itself
    #[serde(flatten)]
    pub line: LyricLine,

    /// Selection flag used for navigation and batch edits
    #[serde(default)]
    pub selected: bool,

    /// Freshly inserted and not yet confirmed by an edit
    #[serde(default)]
    pub draft: bool,

    /// Advisory confidence from assisted tagging, in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl EditableLine {
    /// Wrap a parsed line; not a draft, not selected
    pub fn from_line(line: LyricLine) -> Self {
        Self {
            id: LineId::new(),
            line,
            selected: false,
            draft: false,
            confidence: None,
        }
    }

    /// New draft line created during editing
    pub fn draft(time: f64, raw_text: &str) -> Self {
        Self {
            id: LineId::new(),
            line: LyricLine::from_raw(time, raw_text),
            selected: true,
            draft: true,
            confidence: None,
        }
    }

    /// Attach an assisted-tagging confidence, clamped into [0, 1]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }
}

impl Timed for EditableLine {
    fn time(&self) -> f64 {
        self.line.time
    }
}
