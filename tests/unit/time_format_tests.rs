/*!
 * Tests for LRC and SRT timestamp conversion
 */

use lyricline::errors::FormatError;
use lyricline::time_format::{self, format, format_srt, format_tag, parse, parse_playback_time};

/// Canonical formatting pads every field to two digits
#[test]
fn test_format_withSixtySevenPointFour_shouldReturnCanonicalForm() {
    assert_eq!(format(67.4), "01:07.40");
    assert_eq!(format_tag(67.4), "[01:07.40]");
}

/// Full and short forms parse to the same seconds
#[test]
fn test_parse_withValidForms_shouldReturnSeconds() {
    assert_eq!(parse("01:07.40").unwrap(), 67.4);
    assert_eq!(parse("1:07.40").unwrap(), 67.4);
    assert_eq!(parse("[01:07.40]").unwrap(), 67.4);
    assert_eq!(parse("00:05").unwrap(), 5.0);
    assert_eq!(parse(" [00:05] ").unwrap(), 5.0);
}

/// Formatting normalizes whatever precision was typed
#[test]
fn test_parseThenFormat_withShortInput_shouldNormalize() {
    let seconds = parse("3:07").unwrap();
    assert_eq!(format(seconds), "03:07.00");
}

/// Negative input is rejected with its own variant
#[test]
fn test_parse_withNegativeInput_shouldReturnNegativeError() {
    assert!(matches!(parse("-01:00.00"), Err(FormatError::Negative(_))));
    assert!(matches!(parse("[-00:01.00]"), Err(FormatError::Negative(_))));
}

/// Seconds of 60 or more are out of range
#[test]
fn test_parse_withSixtySeconds_shouldReturnOutOfRange() {
    assert!(matches!(parse("01:60.00"), Err(FormatError::SecondsOutOfRange(_))));
}

/// Anything else that does not match the pattern is malformed
#[test]
fn test_parse_withMalformedInput_shouldReturnMalformed() {
    for input in ["", "abc", "1:7", "01:07.4", "01:07.400", "100:00.00", "01-07.40", "[ar:Artist]"] {
        assert!(
            matches!(parse(input), Err(FormatError::Malformed(_))),
            "expected malformed for {:?}",
            input
        );
    }
}

/// Values that cannot be a playback position format as zero
#[test]
fn test_format_withNegativeOrNonFinite_shouldReturnZero() {
    assert_eq!(format(-5.0), "00:00.00");
    assert_eq!(format(f64::NAN), "00:00.00");
    assert_eq!(format(f64::INFINITY), "00:00.00");
}

/// Minutes are not wrapped into hours
#[test]
fn test_format_withOverAnHour_shouldKeepCountingMinutes() {
    assert_eq!(format(3_600.0), "60:00.00");
}

/// SRT timestamps use hours and milliseconds
#[test]
fn test_formatSrt_withVariousTimes_shouldUseHoursAndMillis() {
    assert_eq!(format_srt(0.0), "00:00:00,000");
    assert_eq!(format_srt(5.0), "00:00:05,000");
    assert_eq!(format_srt(67.4), "00:01:07,400");
}

/// Every centisecond value survives format then parse
#[test]
fn test_formatThenParse_withCentisecondValues_shouldBeLossless() {
    for centis in (0u64..20_000).step_by(37) {
        let seconds = centis as f64 / 100.0;
        assert_eq!(parse(&format(seconds)).unwrap(), seconds);
    }
}

/// Centisecond helpers round to nearest and clamp at zero
#[test]
fn test_toCentis_withVariousInputs_shouldRoundAndClamp() {
    assert_eq!(time_format::to_centis(1.5), 150);
    assert_eq!(time_format::to_centis(0.994), 99);
    assert_eq!(time_format::to_centis(-3.0), 0);
    assert_eq!(time_format::to_centis(f64::NAN), 0);
    assert_eq!(time_format::round_to_centis(2.501), 2.5);
}

/// Playback positions accept both LRC form and plain seconds
#[test]
fn test_parsePlaybackTime_withBothForms_shouldParse() {
    assert_eq!(parse_playback_time("01:07.40").unwrap(), 67.4);
    assert_eq!(parse_playback_time("67.4").unwrap(), 67.4);
    assert_eq!(parse_playback_time(" 5 ").unwrap(), 5.0);
    assert!(matches!(parse_playback_time("-1"), Err(FormatError::Negative(_))));
    assert!(matches!(parse_playback_time("soon"), Err(FormatError::Malformed(_))));
    assert!(matches!(parse_playback_time("inf"), Err(FormatError::Malformed(_))));
}
