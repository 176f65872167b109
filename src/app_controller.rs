use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::app_config::Config;
use crate::converter::{ConversionOptions, Converter};
use crate::errors::AppError;
use crate::file_utils::{FileManager, CAPTION_EXTENSION};
use crate::transcript::DocumentDate;

// @module: Application controller for caption conversion

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Documents written, in part order
    Written(Vec<PathBuf>),
    /// Output already present and overwriting was not requested
    Skipped(PathBuf),
}

/// Totals of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for caption conversion
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Meeting date/time overriding the file modification date
    meeting_date: Option<DocumentDate>,

    converter: Converter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let converter = Converter::new(ConversionOptions::from(&config));
        Ok(Self {
            config,
            meeting_date: None,
            converter,
        })
    }

    /// Use an explicit meeting date/time instead of the file modification date
    pub fn with_meeting_date(mut self, meeting_date: Option<DocumentDate>) -> Self {
        self.meeting_date = meeting_date;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Document date for an input file
    fn document_date(&self, input_file: &Path) -> Result<DocumentDate> {
        match self.meeting_date {
            Some(date) => Ok(date),
            None => {
                let modified = FileManager::modified_time(input_file)?;
                Ok(DocumentDate::FileModified(modified.naive_local()))
            }
        }
    }

    /// Convert one caption file to Markdown documents without writing them
    ///
    /// Returns a single document unless splitting is enabled in the config.
    pub fn convert_file(&self, input_file: &Path) -> Result<Vec<String>> {
        if !FileManager::is_caption_file(input_file) {
            return Err(AppError::File(format!("Not a VTT file: {}", input_file.display())).into());
        }

        let content = FileManager::read_to_string(input_file)?;
        let date = self.document_date(input_file)?;

        let documents = if self.config.output.split {
            self.converter.convert_parts(&content, input_file, date, self.config.output.max_chars_per_part)
        } else {
            vec![self.converter.convert(&content, input_file, date)]
        };

        Ok(documents)
    }

    /// Convert one caption file and write the result next to `output_dir`
    pub fn convert_and_save(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<FileOutcome> {
        let single_path = FileManager::generate_output_path(input_file, output_dir);
        let parts_dir = FileManager::generate_parts_dir(input_file, output_dir);

        if !force_overwrite {
            if single_path.exists() {
                return Ok(FileOutcome::Skipped(single_path));
            }
            if self.config.output.split && parts_dir.is_dir() {
                return Ok(FileOutcome::Skipped(parts_dir));
            }
        }

        let documents = self.convert_file(input_file)?;

        let paths = if documents.len() == 1 {
            vec![single_path]
        } else {
            FileManager::generate_part_paths(&parts_dir, documents.len())
        };

        for (path, document) in paths.iter().zip(&documents) {
            FileManager::write_to_file(path, document)?;
            debug!("Wrote {} characters to {}", document.chars().count(), path.display());
        }

        Ok(FileOutcome::Written(paths))
    }

    /// Run the workflow for a single caption file
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<FileOutcome> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        let outcome = self.convert_and_save(&input_file, &output_dir, force_overwrite)?;
        match &outcome {
            FileOutcome::Written(paths) => {
                for path in paths {
                    info!("Success: {}", path.display());
                }
            }
            FileOutcome::Skipped(path) => {
                warn!("Skipping file, {} already exists (use -f to force overwrite)", path.display());
            }
        }

        Ok(outcome)
    }

    /// Run the workflow in folder mode, converting every caption file found recursively
    ///
    /// Documents go next to each caption file unless `output_dir` is given, in
    /// which case the subfolder layout below `input_dir` is recreated there.
    /// A failing file is logged and does not stop the run.
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let caption_files = FileManager::find_files(&input_dir, CAPTION_EXTENSION)?;
        if caption_files.is_empty() {
            warn!("No .{} files found in {:?}", CAPTION_EXTENSION, input_dir);
            return Ok(FolderSummary::default());
        }

        info!("Converting {} caption file(s)", caption_files.len());

        let progress_bar = ProgressBar::new(caption_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let semaphore = Arc::new(Semaphore::new(self.config.concurrent_jobs));

        let results: Vec<(PathBuf, Result<FileOutcome>)> = stream::iter(caption_files)
            .map(|input_file| {
                let controller = self.clone();
                let semaphore = semaphore.clone();
                let progress_bar = progress_bar.clone();
                let target_dir = match &output_dir {
                    Some(dir) => FileManager::mirror_dir(&input_file, &input_dir, dir),
                    None => input_file.parent().unwrap_or(Path::new(".")).to_path_buf(),
                };

                async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => return (input_file, Err(anyhow!("Semaphore closed: {}", e))),
                    };

                    let task_input = input_file.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        FileManager::ensure_dir(&target_dir)?;
                        controller.convert_and_save(&task_input, &target_dir, force_overwrite)
                    })
                    .await
                    .unwrap_or_else(|e| Err(anyhow!("Conversion task failed: {}", e)));

                    progress_bar.inc(1);
                    (input_file, result)
                }
            })
            .buffer_unordered(self.config.concurrent_jobs)
            .collect()
            .await;

        progress_bar.finish_and_clear();

        let mut summary = FolderSummary::default();
        for (input_file, result) in results {
            match result {
                Ok(FileOutcome::Written(paths)) => {
                    summary.converted += 1;
                    for path in paths {
                        debug!("Success: {}", path.display());
                    }
                }
                Ok(FileOutcome::Skipped(path)) => {
                    summary.skipped += 1;
                    warn!("Skipping {:?}, {} already exists", input_file, path.display());
                }
                Err(e) => {
                    summary.failed += 1;
                    error!("Error processing file {:?}: {:#}", input_file, e);
                }
            }
        }

        info!(
            "Finished in {}: {} converted, {} skipped, {} failed",
            Self::format_duration(start_time.elapsed()),
            summary.converted,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
