/*!
 * Top-level conversion entry point.
 *
 * Ties the pipeline together: extraction, optional filler removal, merging,
 * metadata derivation and rendering. Conversion never returns an error to the
 * caller; failures become a placeholder document.
 */

use std::path::Path;
use log::{debug, error};

use crate::app_config::Config;
use crate::cue_extractor::{CueExtractor, Extraction};
use crate::errors::ConversionError;
use crate::filler_filter::{FillerFilter, DEFAULT_FILLER_WORDS};
use crate::markdown_renderer::{self, NO_CAPTIONS_DOCUMENT};
use crate::transcript::{
    DocumentDate, Transcript, TranscriptBuilder, TranscriptMetadata, DEFAULT_GAP_THRESHOLD_SECONDS,
};

/// Options controlling one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Maximum silence in seconds between merged same-speaker cues
    pub gap_threshold_seconds: u64,

    /// Remove filler words and backchannels before merging
    pub remove_fillers: bool,

    /// Words treated as fillers when `remove_fillers` is set
    pub filler_words: Vec<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            gap_threshold_seconds: DEFAULT_GAP_THRESHOLD_SECONDS,
            remove_fillers: false,
            filler_words: DEFAULT_FILLER_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl From<&Config> for ConversionOptions {
    fn from(config: &Config) -> Self {
        Self {
            gap_threshold_seconds: config.merge_gap_seconds,
            remove_fillers: config.remove_fillers,
            filler_words: config.filler_words.clone(),
        }
    }
}

/// Caption-to-Markdown converter
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConversionOptions,
    extractor: CueExtractor,
}

impl Converter {
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            options,
            extractor: CueExtractor::default(),
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Build the merged transcript, `None` when the file has no cues
    pub fn build(
        &self,
        content: &str,
        source: &Path,
        date: DocumentDate,
    ) -> Result<Option<Transcript>, ConversionError> {
        let (cues, first_start, last_end) = match self.extractor.extract(content)? {
            Extraction::NoCues => return Ok(None),
            Extraction::Cues { cues, first_start, last_end } => (cues, first_start, last_end),
        };

        let cues = if self.options.remove_fillers {
            FillerFilter::new(&self.options.filler_words).apply(cues)
        } else {
            cues
        };

        let utterances = TranscriptBuilder::new(self.options.gap_threshold_seconds).merge(cues);
        let metadata = TranscriptMetadata::derive(source, &utterances, first_start, last_end, date);

        debug!(
            "{}: {} utterance(s), {} participant(s), {} minute(s)",
            metadata.title,
            utterances.len(),
            metadata.participants.len(),
            metadata.duration_minutes
        );

        Ok(Some(Transcript { metadata, utterances }))
    }

    /// Convert to a single Markdown document
    pub fn convert(&self, content: &str, source: &Path, date: DocumentDate) -> String {
        match self.build(content, source, date) {
            Ok(Some(transcript)) => markdown_renderer::render(&transcript.metadata, &transcript.utterances),
            Ok(None) => NO_CAPTIONS_DOCUMENT.to_string(),
            Err(e) => Self::failure_document(source, &e),
        }
    }

    /// Convert to one or more Markdown documents of at most `max_chars_per_part` characters
    pub fn convert_parts(
        &self,
        content: &str,
        source: &Path,
        date: DocumentDate,
        max_chars_per_part: usize,
    ) -> Vec<String> {
        let rendered = self.build(content, source, date).and_then(|transcript| match transcript {
            Some(t) => markdown_renderer::render_parts(&t.metadata, &t.utterances, max_chars_per_part),
            None => Ok(vec![NO_CAPTIONS_DOCUMENT.to_string()]),
        });

        rendered.unwrap_or_else(|e| vec![Self::failure_document(source, &e)])
    }

    fn failure_document(source: &Path, e: &ConversionError) -> String {
        error!("Conversion of {} failed: {}", source.display(), e);
        markdown_renderer::error_document(&e.to_string())
    }
}

/// Convert caption content with default options
pub fn convert_vtt_to_md(content: &str, source: &Path, date: DocumentDate) -> String {
    Converter::default().convert(content, source, date)
}
