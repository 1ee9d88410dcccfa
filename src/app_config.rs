use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::export::{ExportFormat, ExportOptions};

/// Settings loaded from `conf.json`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,

    /// Editing session settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Default export target
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ExportConfig {
    // @field: Format used when none is given on the command line
    #[serde(default)]
    pub format: ExportFormat,

    // @field: Format options
    #[serde(default)]
    pub options: ExportOptions,
}

/// Editing session configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    /// Save the project automatically after edits
    #[serde(default = "default_true")]
    pub auto_save: bool,

    /// Quiet period after the last edit before autosaving, in seconds
    #[serde(default = "default_auto_save_delay_secs")]
    pub auto_save_delay_secs: u64,

    /// Lines shown on each side of the active line
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_save: default_true(),
            auto_save_delay_secs: default_auto_save_delay_secs(),
            context_lines: default_context_lines(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_auto_save_delay_secs() -> u64 {
    5 // seconds after the last edit
}

fn default_context_lines() -> usize {
    2
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.editor.auto_save && self.editor.auto_save_delay_secs == 0 {
            return Err(anyhow!("auto_save_delay_secs must be greater than zero when auto_save is enabled"));
        }

        Ok(())
    }

    /// Load configuration from a JSON file, writing defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            export: ExportConfig::default(),
            editor: EditorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
