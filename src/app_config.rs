use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::filler_filter::DEFAULT_FILLER_WORDS;
use crate::transcript::DEFAULT_GAP_THRESHOLD_SECONDS;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Maximum silence in seconds between same-speaker cues that are merged
    #[serde(default = "default_merge_gap_seconds")]
    pub merge_gap_seconds: u64,

    /// Remove filler words and backchannel replies
    #[serde(default)]
    pub remove_fillers: bool,

    /// Words removed when `remove_fillers` is enabled
    #[serde(default = "default_filler_words")]
    pub filler_words: Vec<String>,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Number of files converted in parallel in folder mode
    #[serde(default = "default_concurrent_jobs")]
    pub concurrent_jobs: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Split long transcripts into several files
    #[serde(default)]
    pub split: bool,

    /// Maximum characters per file when splitting
    #[serde(default = "default_max_chars_per_part")]
    pub max_chars_per_part: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            split: false,
            max_chars_per_part: default_max_chars_per_part(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
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
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// @const: Smallest split budget that still leaves room for the header
pub const MIN_CHARS_PER_PART: usize = 1000;

fn default_merge_gap_seconds() -> u64 {
    DEFAULT_GAP_THRESHOLD_SECONDS
}

fn default_filler_words() -> Vec<String> {
    DEFAULT_FILLER_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_max_chars_per_part() -> usize {
    10_000
}

fn default_concurrent_jobs() -> usize {
    4
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.output.max_chars_per_part < MIN_CHARS_PER_PART {
            return Err(AppError::Config(format!(
                "output.max_chars_per_part must be at least {}, got {}",
                MIN_CHARS_PER_PART, self.output.max_chars_per_part
            )));
        }

        if self.concurrent_jobs == 0 {
            return Err(AppError::Config("concurrent_jobs must be at least 1".to_string()));
        }

        if self.remove_fillers && self.filler_words.iter().all(|w| w.trim().is_empty()) {
            return Err(AppError::Config(
                "remove_fillers is enabled but filler_words is empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            merge_gap_seconds: default_merge_gap_seconds(),
            remove_fillers: false,
            filler_words: default_filler_words(),
            output: OutputConfig::default(),
            concurrent_jobs: default_concurrent_jobs(),
            log_level: LogLevel::default(),
        }
    }
}
