/*!
 * Lyric export.
 *
 * Renders time-ordered lyric lines into one of five text formats:
 * - `lrc`: plain LRC, singer tags stripped
 * - `enhanced-lrc`: LRC with `@singer@` tags re-emitted
 * - `json`: structured `{ "lyrics": [...] }`
 * - `srt`: subtitle entries, each ending where the next line starts
 * - `txt`: plain text with optional timestamps
 *
 * Every renderer is a pure function of the lines and the options. Line
 * ending conversion runs last, uniformly for all formats.
 */

pub mod json;
pub mod lrc;
pub mod srt;
pub mod txt;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ExportError;
use crate::model::LyricLine;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Standard LRC
    Lrc,
    /// LRC with singer tags
    #[default]
    EnhancedLrc,
    /// JSON data
    Json,
    /// SubRip subtitles
    Srt,
    /// Plain text
    Txt,
}

impl ExportFormat {
    /// All formats in menu order
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Lrc,
        ExportFormat::EnhancedLrc,
        ExportFormat::Json,
        ExportFormat::Srt,
        ExportFormat::Txt,
    ];

    // @returns: Format identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::Lrc => "lrc",
            Self::EnhancedLrc => "enhanced-lrc",
            Self::Json => "json",
            Self::Srt => "srt",
            Self::Txt => "txt",
        }
    }

    // @returns: File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Lrc | Self::EnhancedLrc => "lrc",
            Self::Json => "json",
            Self::Srt => "srt",
            Self::Txt => "txt",
        }
    }

    // @returns: One-line description for help output
    pub fn description(&self) -> &'static str {
        match self {
            Self::Lrc => "Standard LRC, compatible with most music players",
            Self::EnhancedLrc => "LRC with @singer@ tags",
            Self::Json => "Structured data for programmatic use",
            Self::Srt => "Subtitle format for video work",
            Self::Txt => "Plain text with optional timestamps",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lrc" => Ok(Self::Lrc),
            "enhanced-lrc" | "enhanced_lrc" => Ok(Self::EnhancedLrc),
            "json" => Ok(Self::Json),
            "srt" => Ok(Self::Srt),
            "txt" => Ok(Self::Txt),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Target text encoding.
///
/// Conversion happens outside this crate; output is always UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "gbk")]
    Gbk,
}

/// Line terminator of the exported text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

/// Options shared by all export formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Prefix txt lines with `[mm:ss.cc] `
    #[serde(default = "default_true")]
    pub include_timestamps: bool,

    /// Keep singer information (enhanced-lrc tags, json segments)
    #[serde(default = "default_true")]
    pub include_singer_tags: bool,

    /// Requested encoding
    #[serde(default)]
    pub encoding: TextEncoding,

    /// Requested line terminator
    #[serde(default)]
    pub line_ending: LineEnding,
}

fn default_true() -> bool {
    true
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_timestamps: true,
            include_singer_tags: true,
            encoding: TextEncoding::default(),
            line_ending: LineEnding::default(),
        }
    }
}

/// Render lines in the given format.
///
/// The result is an owned snapshot; nothing refers back to the lines.
pub fn export<'a, I>(lines: I, format: ExportFormat, options: &ExportOptions) -> String
where
    I: IntoIterator<Item = &'a LyricLine>,
{
    let lines: Vec<&LyricLine> = lines.into_iter().collect();

    if options.encoding == TextEncoding::Gbk {
        debug!("GBK requested; rendering UTF-8 and leaving conversion to the writer");
    }

    let content = match format {
        ExportFormat::Lrc => lrc::render(&lines),
        ExportFormat::EnhancedLrc => lrc::render_enhanced(&lines, options),
        ExportFormat::Json => json::render(&lines, options),
        ExportFormat::Srt => srt::render(&lines),
        ExportFormat::Txt => txt::render(&lines, options),
    };

    debug!("Exported {} line(s) as {}", lines.len(), format);

    apply_line_ending(content, options.line_ending)
}

/// Convert `\n` to `\r\n` when CRLF is requested
pub fn apply_line_ending(content: String, line_ending: LineEnding) -> String {
    match line_ending {
        LineEnding::Lf => content,
        LineEnding::Crlf => content.replace('\n', "\r\n"),
    }
}
