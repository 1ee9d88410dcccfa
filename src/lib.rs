/*!
 * # lyricline - lyrics timeline engine
 *
 * A Rust library for working with time-synchronized song lyrics.
 *
 * ## Features
 *
 * - Parse LRC documents with inline singer tags (`@kaho@Hello`, `@a,b@Together`)
 * - Find the active line for a playback position in O(log n)
 * - Edit timestamps while keeping lines strictly ordered
 * - Export to LRC, enhanced LRC, JSON, SRT and plain text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `model`: Segments, lines and editable lines
 * - `tag_tokenizer`: Singer tag splitting
 * - `time_format`: `[mm:ss.cc]` and SRT timestamp conversion
 * - `lyrics_parser`: Document parsing
 * - `timeline`: The editable, always-sorted line collection
 * - `locator`: Active line lookup
 * - `export`: Output formats
 * - `project`: Editing session persistence and autosave
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Command line workflows
 * - `errors`: Custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod locator;
pub mod lyrics_parser;
pub mod model;
pub mod project;
pub mod tag_tokenizer;
pub mod time_format;
pub mod timeline;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ExportError, FormatError, TimelineError};
pub use export::{ExportFormat, ExportOptions, LineEnding, TextEncoding, export};
pub use locator::{LyricsContext, active_index, context_window};
pub use lyrics_parser::{LyricsDocument, parse, parse_document};
pub use model::{EditableLine, LineId, LyricLine, Segment, Timed};
pub use project::{Autosaver, TimelineProject};
pub use tag_tokenizer::tokenize;
pub use timeline::{AdjustDirection, Precision, RetimeOutcome, SharedTimeline, Timeline};
