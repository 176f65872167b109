use std::collections::BTreeSet;
use std::path::Path;
use chrono::NaiveDateTime;
use log::debug;

use crate::caption_parser::Timestamp;
use crate::cue_extractor::NormalizedCue;
use crate::errors::ConversionError;

// @module: Utterance merging and transcript metadata

/// Default maximum silence between same-speaker cues that still merges them
pub const DEFAULT_GAP_THRESHOLD_SECONDS: u64 = 60;

// @const: Accepted formats for an explicit meeting date/time
const MEETING_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y/%m/%d %H:%M"];

// @struct: Consecutive same-speaker cues consolidated into one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speaker: String,
    pub text: String,
    // @field: Start of the first constituent cue, never changes
    pub start: Timestamp,
    // @field: End of the latest constituent cue
    pub end: Timestamp,
}

impl Utterance {
    fn from_cue(cue: NormalizedCue) -> Self {
        let (speaker, text, start, end) = cue.into_parts();
        Utterance { speaker, text, start, end }
    }

    fn absorb(&mut self, cue: NormalizedCue) {
        self.text.push(' ');
        self.text.push_str(cue.text());
        self.end = cue.end();
    }
}

/// Merges normalized cues into utterances
#[derive(Debug, Clone, Copy)]
pub struct TranscriptBuilder {
    gap_threshold_seconds: u64,
}

impl Default for TranscriptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_GAP_THRESHOLD_SECONDS)
    }
}

impl TranscriptBuilder {
    pub fn new(gap_threshold_seconds: u64) -> Self {
        TranscriptBuilder { gap_threshold_seconds }
    }

    pub fn gap_threshold_seconds(&self) -> u64 {
        self.gap_threshold_seconds
    }

    /// Merge consecutive same-speaker cues in a single pass
    ///
    /// A cue joins the previous utterance when the speaker is the same and the
    /// silence between the utterance end and the cue start, compared at
    /// whole-second precision with fractions truncated, is within the gap
    /// threshold. Overlapping cues count as a negative gap and merge.
    pub fn merge<I>(&self, cues: I) -> Vec<Utterance>
    where
        I: IntoIterator<Item = NormalizedCue>,
    {
        let mut utterances: Vec<Utterance> = Vec::new();
        let mut cue_count = 0usize;

        for cue in cues {
            cue_count += 1;

            if let Some(last) = utterances.last_mut() {
                if last.speaker == cue.speaker() && self.within_gap(last.end, cue.start()) {
                    last.absorb(cue);
                    continue;
                }
            }

            utterances.push(Utterance::from_cue(cue));
        }

        debug!("Merged {} cue(s) into {} utterance(s)", cue_count, utterances.len());
        utterances
    }

    fn within_gap(&self, previous_end: Timestamp, next_start: Timestamp) -> bool {
        let gap = next_start.whole_seconds() as i128 - previous_end.whole_seconds() as i128;
        gap <= self.gap_threshold_seconds as i128
    }
}

/// Where the document date comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentDate {
    /// Last-modified time of the caption file
    FileModified(NaiveDateTime),
    /// Meeting date and start time supplied by the user
    Meeting(NaiveDateTime),
}

impl DocumentDate {
    /// Parse a user-supplied meeting date/time such as `2024-05-01 14:30`
    pub fn parse_meeting(value: &str) -> Result<Self, ConversionError> {
        let value = value.trim();
        MEETING_DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(DocumentDate::Meeting)
            .ok_or_else(|| {
                ConversionError::InvalidOption(format!(
                    "Invalid meeting date/time '{}', expected YYYY-MM-DD HH:MM",
                    value
                ))
            })
    }

    /// Japanese calendar rendering used in the document header
    pub fn render(&self) -> String {
        match self {
            DocumentDate::FileModified(at) => at.format("%Y年%m月%d日").to_string(),
            DocumentDate::Meeting(at) => at.format("%Y年%m月%d日 %H:%M").to_string(),
        }
    }
}

/// Summary information shown above the utterance log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptMetadata {
    pub title: String,
    pub participants: Vec<String>,
    pub duration_minutes: u64,
    pub date: DocumentDate,
}

impl TranscriptMetadata {
    /// Derive metadata from the merged utterances and the outermost raw cue times
    pub fn derive(
        source: &Path,
        utterances: &[Utterance],
        first_start: Timestamp,
        last_end: Timestamp,
        date: DocumentDate,
    ) -> Self {
        TranscriptMetadata {
            title: title_from_source(source),
            participants: participants(utterances),
            duration_minutes: duration_minutes(first_start, last_end),
            date,
        }
    }
}

/// Metadata and merged utterances of one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub metadata: TranscriptMetadata,
    pub utterances: Vec<Utterance>,
}

/// Base name of the source without its extension
pub fn title_from_source(source: &Path) -> String {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Distinct speakers in ascending order
pub fn participants(utterances: &[Utterance]) -> Vec<String> {
    utterances
        .iter()
        .map(|u| u.speaker.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whole minutes between two timestamps, rounded half to even, floored at zero
pub fn duration_minutes(first_start: Timestamp, last_end: Timestamp) -> u64 {
    let seconds = last_end.whole_seconds() as i128 - first_start.whole_seconds() as i128;
    if seconds <= 0 {
        return 0;
    }
    (seconds as f64 / 60.0).round_ties_even() as u64
}
