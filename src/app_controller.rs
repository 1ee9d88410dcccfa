use anyhow::{Result, anyhow};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::export::{ExportFormat, ExportOptions};
use crate::file_utils::{FileManager, FileType};
use crate::locator::{self, LyricsContext};
use crate::timeline::Timeline;

// @module: Application controller for lyric conversion and inspection

/// What happened to one input during conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// Export written to the path
    Written(PathBuf),
    /// Output already existed and overwrite was not forced
    Skipped(PathBuf),
    /// Input held no timestamped lyrics; nothing written
    Empty(PathBuf),
}

/// Totals for a directory conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub written: usize,
    pub skipped: usize,
    pub empty: usize,
    pub failed: usize,
}

impl ConvertSummary {
    fn record(&mut self, outcome: &ConvertOutcome) {
        match outcome {
            ConvertOutcome::Written(_) => self.written += 1,
            ConvertOutcome::Skipped(_) => self.skipped += 1,
            ConvertOutcome::Empty(_) => self.empty += 1,
        }
    }
}

/// One line of a locate report
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedLine {
    pub index: usize,
    pub is_current: bool,
    pub time: f64,
    pub text: String,
}

/// Active line with its surroundings at a playback position
#[derive(Debug, Clone, PartialEq)]
pub struct LocateReport {
    pub current_index: Option<usize>,
    pub lines: Vec<LocatedLine>,
}

/// Result of shifting a whole document
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftReport {
    pub moved: usize,
    pub total: usize,
    pub output: PathBuf,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lyric file to read for an input: audio tracks map to their sibling `.lrc`
    pub fn resolve_lyrics_path(&self, input: &Path) -> Result<PathBuf> {
        match FileManager::detect_file_type(input)? {
            FileType::Audio => {
                let lyrics = FileManager::lyrics_path_for_track(input);
                debug!("Audio track given, using lyrics file {:?}", lyrics);
                Ok(lyrics)
            }
            FileType::Lyrics => Ok(input.to_path_buf()),
            FileType::Unknown => {
                warn!("Unrecognized file type for {:?}, parsing as lyrics anyway", input);
                Ok(input.to_path_buf())
            }
        }
    }

    /// Read and parse the lyrics for an input into a timeline
    pub fn load_timeline(&self, input: &Path) -> Result<Timeline> {
        let path = self.resolve_lyrics_path(input)?;
        let document = FileManager::load_document(&path)?;
        if !document.has_lyrics {
            warn!("No timestamped lyrics found in {:?}", path);
        }
        Ok(Timeline::from_lines(document.lines))
    }

    /// Convert one lyric file into `format`.
    ///
    /// The output goes next to the input unless `output_dir` is given.
    pub fn convert_file(
        &self,
        input: &Path,
        format: ExportFormat,
        options: &ExportOptions,
        output_dir: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<ConvertOutcome> {
        if !input.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input));
        }

        let timeline = self.load_timeline(input)?;
        let output_dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let output_path = FileManager::generate_output_path(input, &output_dir, format.extension());

        if timeline.is_empty() {
            warn!("Nothing to export from {:?}", input);
            return Ok(ConvertOutcome::Empty(output_path));
        }

        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_path);
            return Ok(ConvertOutcome::Skipped(output_path));
        }

        let content = timeline.export(format, options);
        FileManager::write_to_file(&output_path, &content)?;
        info!("Exported {} line(s) to {:?}", timeline.len(), output_path);

        Ok(ConvertOutcome::Written(output_path))
    }

    /// Convert a file, or every `.lrc` file below a directory
    pub fn convert_path(
        &self,
        input: &Path,
        format: ExportFormat,
        options: &ExportOptions,
        output_dir: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<ConvertSummary> {
        let mut summary = ConvertSummary::default();

        if !FileManager::dir_exists(input) {
            let outcome = self.convert_file(input, format, options, output_dir, force_overwrite)?;
            summary.record(&outcome);
            return Ok(summary);
        }

        let files = FileManager::find_files(input, "lrc")?;
        if files.is_empty() {
            warn!("No .lrc files found in {:?}", input);
        }

        for file in files {
            match self.convert_file(&file, format, options, output_dir, force_overwrite) {
                Ok(outcome) => summary.record(&outcome),
                Err(e) => {
                    error!("Failed to convert {:?}: {:#}", file, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Converted {} file(s): {} skipped, {} empty, {} failed",
            summary.written, summary.skipped, summary.empty, summary.failed
        );
        Ok(summary)
    }

    /// Active line and its neighbours at `time`
    pub fn locate(&self, input: &Path, time: f64, context_lines: Option<usize>) -> Result<LocateReport> {
        let timeline = self.load_timeline(input)?;
        let context_lines = context_lines.unwrap_or(self.config.editor.context_lines);
        let LyricsContext { current_index, visible } =
            locator::context_window(timeline.lines(), time, context_lines);

        let lines = visible
            .into_iter()
            .map(|visible| {
                let line = &timeline.lines()[visible.index].line;
                LocatedLine {
                    index: visible.index,
                    is_current: visible.is_current,
                    time: line.time,
                    text: line.text.clone(),
                }
            })
            .collect();

        Ok(LocateReport { current_index, lines })
    }

    /// Shift every line by `offset` seconds and write enhanced LRC.
    ///
    /// Writes back to the input unless `output` is given.
    pub fn shift(&self, input: &Path, offset: f64, output: Option<&Path>) -> Result<ShiftReport> {
        let mut timeline = self.load_timeline(input)?;
        timeline.select_all();
        let moved = timeline.batch_adjust(offset);
        timeline.clear_selection();

        let output = match output {
            Some(path) => path.to_path_buf(),
            None => self.resolve_lyrics_path(input)?,
        };
        let options = ExportOptions {
            include_singer_tags: true,
            ..self.config.export.options.clone()
        };
        let content = timeline.export(ExportFormat::EnhancedLrc, &options);
        FileManager::write_to_file(&output, &content)?;

        info!("Shifted {} of {} line(s) by {:+.2}s into {:?}", moved, timeline.len(), offset, output);
        Ok(ShiftReport {
            moved,
            total: timeline.len(),
            output,
        })
    }
}
