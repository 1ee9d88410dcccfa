use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::lyrics_parser::{self, LyricsDocument};

// @module: File and directory utilities

// @const: A line starting with an LRC timestamp tag
static LRC_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*\[\d{1,2}:\d{2}(?:\.\d{2})?\]").unwrap()
});

/// Audio extensions that may have a sibling `.lrc` file
const AUDIO_EXTENSIONS: [&str; 8] = ["mp3", "flac", "wav", "ogg", "m4a", "aac", "opus", "wma"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for an exported lyric file
    // @params: input_file, output_dir, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(extension.trim_start_matches('.'));

        output_dir.as_ref().join(output_filename)
    }

    /// Lyrics file belonging to a track: `Album/Song.flac` -> `Album/Song.lrc`
    pub fn lyrics_path_for_track<P: AsRef<Path>>(track_path: P) -> PathBuf {
        track_path.as_ref().with_extension("lrc")
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let wanted = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(wanted) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read and parse a lyric document.
    ///
    /// An unreadable file is an error; a readable file without timestamped
    /// lines is a document with `has_lyrics == false`.
    pub fn load_document<P: AsRef<Path>>(path: P) -> Result<LyricsDocument> {
        let content = Self::read_to_string(&path)?;
        // Tolerate a UTF-8 byte order mark written by some editors
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        Ok(lyrics_parser::parse_document(content))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Detect whether a file is a lyric document or an audio track
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();

            if ext_str == "lrc" {
                return Ok(FileType::Lyrics);
            }

            if AUDIO_EXTENSIONS.contains(&ext_str.as_str()) {
                return Ok(FileType::Audio);
            }
        }

        // Fall back to examining file contents
        if let Ok(content) = fs::read_to_string(path) {
            if LRC_LINE_REGEX.is_match(&content) {
                return Ok(FileType::Lyrics);
            }
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// Lyric document (LRC, possibly with singer tags)
    Lyrics,
    /// Audio track whose lyrics live next to it
    Audio,
    /// Unknown file type
    Unknown,
}
