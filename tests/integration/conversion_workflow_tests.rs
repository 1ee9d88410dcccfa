/*!
 * Integration tests for the convert, locate and shift workflows
 */

use std::fs;

use anyhow::Result;
use lyricline::app_config::Config;
use lyricline::app_controller::{ConvertOutcome, Controller};
use lyricline::export::{ExportFormat, ExportOptions};
use lyricline::file_utils::FileManager;
use lyricline::lyrics_parser;
use crate::common;

fn controller() -> Result<Controller> {
    Controller::with_config(Config::default())
}

/// Converting writes the export into the requested directory
#[test]
fn test_convert_file_withOutputDir_shouldWriteSrt() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_lyrics(temp_dir.path(), "song.lrc")?;
    let out_dir = temp_dir.path().join("out");

    let outcome = controller()?.convert_file(
        &input,
        ExportFormat::Srt,
        &ExportOptions::default(),
        Some(&out_dir),
        false,
    )?;

    let expected_path = out_dir.join("song.srt");
    assert_eq!(outcome, ConvertOutcome::Written(expected_path.clone()));
    let content = FileManager::read_to_string(&expected_path)?;
    assert!(content.starts_with("1\n00:00:01,500 --> 00:00:04,000\nHello World\n"));
    Ok(())
}

/// Existing outputs are kept unless overwriting is forced
#[test]
fn test_convert_file_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_lyrics(temp_dir.path(), "song.lrc")?;
    let existing = common::create_test_file(temp_dir.path(), "song.txt", "keep me")?;
    let controller = controller()?;
    let options = ExportOptions::default();

    let skipped = controller.convert_file(&input, ExportFormat::Txt, &options, None, false)?;
    assert_eq!(skipped, ConvertOutcome::Skipped(existing.clone()));
    assert_eq!(fs::read_to_string(&existing)?, "keep me");

    let written = controller.convert_file(&input, ExportFormat::Txt, &options, None, true)?;
    assert_eq!(written, ConvertOutcome::Written(existing.clone()));
    assert!(fs::read_to_string(&existing)?.starts_with("[00:01.50] Hello World"));
    Ok(())
}

/// Converting lrc to lrc in place never clobbers the source
#[test]
fn test_convert_file_toSameExtensionInPlace_shouldSkip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_lyrics(temp_dir.path(), "song.lrc")?;

    let outcome = controller()?.convert_file(&input, ExportFormat::Lrc, &ExportOptions::default(), None, false)?;

    assert_eq!(outcome, ConvertOutcome::Skipped(input.clone()));
    assert_eq!(fs::read_to_string(&input)?, common::SAMPLE_LYRICS);
    Ok(())
}

/// Documents without lyrics produce no output file
#[test]
fn test_convert_file_withNoLyrics_shouldReportEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "blank.lrc", "[ar:Nobody]\n")?;

    let outcome = controller()?.convert_file(&input, ExportFormat::Json, &ExportOptions::default(), None, false)?;

    let output = temp_dir.path().join("blank.json");
    assert_eq!(outcome, ConvertOutcome::Empty(output.clone()));
    assert!(!output.exists());
    Ok(())
}

/// Missing inputs are errors
#[test]
fn test_convert_file_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = controller()?.convert_file(
        &temp_dir.path().join("missing.lrc"),
        ExportFormat::Lrc,
        &ExportOptions::default(),
        None,
        false,
    );
    assert!(result.is_err());
    Ok(())
}

/// Directory conversion handles every lyric file and tallies the outcomes
#[test]
fn test_convert_path_withDirectory_shouldConvertEveryLrc() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let album = temp_dir.path().join("album");
    common::create_sample_lyrics(&album, "one.lrc")?;
    common::create_sample_lyrics(&album, "disc2/two.lrc")?;
    common::create_test_file(&album, "three.lrc", "no lyrics here")?;
    common::create_test_file(&album, "cover.txt", "not lyrics")?;
    let out_dir = temp_dir.path().join("json");

    let summary = controller()?.convert_path(
        &album,
        ExportFormat::Json,
        &ExportOptions::default(),
        Some(&out_dir),
        false,
    )?;

    assert_eq!(summary.written, 2);
    assert_eq!(summary.empty, 1);
    assert_eq!(summary.failed, 0);
    assert!(out_dir.join("one.json").exists());
    assert!(out_dir.join("two.json").exists());
    Ok(())
}

/// Locating through an audio track reads the sibling lyrics
#[test]
fn test_locate_withAudioTrack_shouldUseSiblingLyrics() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_sample_lyrics(temp_dir.path(), "song.lrc")?;
    let track = temp_dir.path().join("song.flac");
    fs::write(&track, [0u8; 16])?;

    let report = controller()?.locate(&track, 5.0, Some(1))?;

    assert_eq!(report.current_index, Some(1));
    let texts: Vec<&str> = report.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello World", "Together now", "La la"]);
    assert!(report.lines[1].is_current);
    assert_eq!(report.lines[1].time, 4.0);
    Ok(())
}

/// Before the first line nothing is current and the configured context applies
#[test]
fn test_locate_beforeFirstLine_shouldHaveNoCurrentLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_lyrics(temp_dir.path(), "song.lrc")?;

    let report = controller()?.locate(&input, 0.2, None)?;

    assert_eq!(report.current_index, None);
    assert_eq!(report.lines.len(), 3);
    assert!(report.lines.iter().all(|l| !l.is_current));
    Ok(())
}

/// Shifting moves every line and keeps the singer tags
#[test]
fn test_shift_withPositiveOffset_shouldMoveAllLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_lyrics(temp_dir.path(), "song.lrc")?;
    let output = temp_dir.path().join("shifted.lrc");

    let report = controller()?.shift(&input, 1.0, Some(&output))?;

    assert_eq!(report.moved, 5);
    assert_eq!(report.total, 5);
    assert_eq!(report.output, output);

    let shifted = lyrics_parser::parse(&FileManager::read_to_string(&output)?);
    let times: Vec<f64> = shifted.iter().map(|l| l.time).collect();
    assert_eq!(times, vec![2.5, 5.0, 9.25, 13.0, 21.0]);
    assert_eq!(shifted[0].segments[0].singers, vec!["kaho".to_string()]);
    assert_eq!(fs::read_to_string(&input)?, common::SAMPLE_LYRICS);
    Ok(())
}

/// Shifting earlier than zero stacks the first lines at the start
#[test]
fn test_shift_withLargeNegativeOffset_shouldClampAtStart() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_sample_lyrics(temp_dir.path(), "song.lrc")?;

    let report = controller()?.shift(&input, -5.0, None)?;

    let shifted = lyrics_parser::parse(&FileManager::read_to_string(&input)?);
    let times: Vec<f64> = shifted.iter().map(|l| l.time).collect();
    assert_eq!(times, vec![0.0, 0.01, 3.25, 7.0, 15.0]);
    assert_eq!(report.moved, 5);
    Ok(())
}

/// Shifting through an audio track rewrites the sibling lyrics, never the track
#[test]
fn test_shift_withAudioTrack_shouldRewriteSiblingLrc() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = temp_dir.path().join("Song.flac");
    let audio_bytes: &[u8] = b"fLaC\0binary-audio";
    fs::write(&audio, audio_bytes)?;
    let lyrics = common::create_test_file(temp_dir.path(), "Song.lrc", "[00:01.00]Hello\n")?;

    let report = controller()?.shift(&audio, 1.0, None)?;

    assert_eq!(report.output, lyrics);
    assert_eq!(fs::read(&audio)?, audio_bytes);
    let shifted = lyrics_parser::parse(&FileManager::read_to_string(&lyrics)?);
    assert_eq!(shifted.len(), 1);
    assert_eq!(shifted[0].time, 2.0);
    Ok(())
}

/// Invalid configurations are rejected up front
#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.editor.auto_save_delay_secs = 0;
    assert!(Controller::with_config(config).is_err());
}
