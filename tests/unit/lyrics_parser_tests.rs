/*!
 * Tests for tagged LRC document parsing
 */

use lyricline::lyrics_parser::{parse, parse_document};
use lyricline::model::Segment;
use crate::common;

/// A tagged line yields one line with attributed segments
#[test]
fn test_parse_withTaggedLine_shouldProduceSegments() {
    let lines = parse("[00:01.50]@kaho@Hello @sayaka@World");

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].time, 1.5);
    assert_eq!(lines[0].text, "Hello World");
    assert_eq!(
        lines[0].segments,
        vec![
            Segment::tagged("Hello", vec!["kaho".to_string()]),
            Segment::tagged("World", vec!["sayaka".to_string()]),
        ]
    );
}

/// Several timestamps on one line repeat the text at each time
#[test]
fn test_parse_withMultipleTimestamps_shouldEmitOneLinePerTimestamp() {
    let lines = parse("[00:00.00][00:05.00]La la");

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].time, 0.0);
    assert_eq!(lines[1].time, 5.0);
    assert!(lines.iter().all(|l| l.text == "La la"));
    assert_eq!(lines[0].segments, lines[1].segments);
    assert_eq!(lines[0].original_time, "[00:00.00]");
    assert_eq!(lines[1].original_time, "[00:05.00]");
}

/// Metadata, blank lines and untimed lines produce nothing
#[test]
fn test_parse_withMetadataAndNoise_shouldSkipThem() {
    let content = "[ar:Artist]\n  [ti:Title]\n\n   \nno timestamp here\n[00:02.00]Real line\n";
    let lines = parse(content);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Real line");
}

/// Output is sorted by time regardless of source order
#[test]
fn test_parse_withOutOfOrderLines_shouldSortByTime() {
    let lines = parse("[00:09.00]C\n[00:01.00]A\n[00:05.00]B");
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["A", "B", "C"]);
}

/// Equal times keep their source order
#[test]
fn test_parse_withEqualTimes_shouldKeepSourceOrder() {
    let lines = parse("[00:02.00]first\n[00:01.00]zero\n[00:02.00]second");
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["zero", "first", "second"]);
}

/// The tag text is kept as written in the source
#[test]
fn test_parse_withShortTimestamp_shouldKeepOriginalTagText() {
    let lines = parse("[1:02]Short form");
    assert_eq!(lines[0].time, 62.0);
    assert_eq!(lines[0].original_time, "[1:02]");
}

/// Bracket groups that are not timestamps stay in the lyric text
#[test]
fn test_parse_withNonTimestampBracket_shouldKeepItInText() {
    let lines = parse("[00:01.00][chorus] Sing it");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "[chorus] Sing it");
}

/// A timestamp with no text gives an empty line, not an error
#[test]
fn test_parse_withTimestampOnly_shouldProduceEmptyLine() {
    let lines = parse("[00:03.00]");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "");
    assert!(lines[0].segments.is_empty());
}

/// Windows line endings are handled
#[test]
fn test_parse_withCrlfInput_shouldParseAllLines() {
    let lines = parse("[00:01.00]A\r\n[00:02.00]B\r\n");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].text, "B");
}

/// Every parsed line satisfies the flatten relation
#[test]
fn test_parse_withSampleDocument_shouldKeepTextConsistentWithSegments() {
    common::init_logging();
    let lines = parse(common::SAMPLE_LYRICS);

    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|l| l.is_consistent()));
    assert!(lines.windows(2).all(|w| w[0].time <= w[1].time));
}

/// A document without timestamps is a valid empty document
#[test]
fn test_parseDocument_withNoTimestamps_shouldReportNoLyrics() {
    let document = parse_document("[ar:Someone]\njust words\n");
    assert!(document.is_empty());
    assert!(!document.has_lyrics);

    let document = parse_document(common::SAMPLE_LYRICS);
    assert_eq!(document.len(), 5);
    assert!(document.has_lyrics);
}
