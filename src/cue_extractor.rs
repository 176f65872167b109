/*!
 * Cue extraction: turns a raw caption body into speaker-attributed cues.
 *
 * Two tool quirks are handled here as separate filters so they can be
 * extended or removed on their own:
 * - `strip_uuid_lines` runs on the raw body before tokenizing and removes the
 *   `<uuid>/<n>-<n>` lines one meeting exporter writes above every cue.
 * - `normalize` runs on each tokenized cue and drops cues without a speaker
 *   marker or without text (system messages, sound effects).
 */

use std::borrow::Cow;
use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;

use crate::caption_parser::{Cue, CueTokenizer, Timestamp, WebVttTokenizer};
use crate::errors::CaptionError;

static UUID_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[0-9a-fA-F]{8}-(?:[0-9a-fA-F]{4}-){3}[0-9a-fA-F]{12}/\d+-\d+[ \t]*\r?$").unwrap()
});

static SPEAKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<v\s+([^>]+)>").unwrap()
});

static VOICE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<v\s+[^>]+>|</?v>").unwrap()
});

/// A cue with a known speaker and non-empty text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCue {
    speaker: String,
    text: String,
    start: Timestamp,
    end: Timestamp,
}

impl NormalizedCue {
    /// Returns `None` when the speaker or the text is empty after trimming
    pub fn new(
        speaker: impl Into<String>,
        text: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
    ) -> Option<Self> {
        let speaker = speaker.into().trim().to_string();
        let text = text.into().trim().to_string();

        if speaker.is_empty() || text.is_empty() {
            return None;
        }

        Some(NormalizedCue { speaker, text, start, end })
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Same cue with replaced text, `None` if the new text is empty
    pub fn with_text(self, text: impl Into<String>) -> Option<Self> {
        Self::new(self.speaker, text, self.start, self.end)
    }

    pub(crate) fn into_parts(self) -> (String, String, Timestamp, Timestamp) {
        (self.speaker, self.text, self.start, self.end)
    }
}

/// Result of extracting cues from a caption body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The tokenizer found no cues at all
    NoCues,

    /// At least one cue was tokenized; `cues` may still be empty when every
    /// cue was dropped
    Cues {
        cues: Vec<NormalizedCue>,
        /// Start of the first tokenized cue, dropped cues included
        first_start: Timestamp,
        /// End of the last tokenized cue, dropped cues included
        last_end: Timestamp,
    },
}

/// Extracts normalized cues using a pluggable tokenizer
#[derive(Debug, Clone, Default)]
pub struct CueExtractor<T: CueTokenizer = WebVttTokenizer> {
    tokenizer: T,
}

impl<T: CueTokenizer> CueExtractor<T> {
    pub fn new(tokenizer: T) -> Self {
        CueExtractor { tokenizer }
    }

    /// Extract speaker-attributed cues from a raw caption body
    pub fn extract(&self, raw_body: &str) -> Result<Extraction, CaptionError> {
        let cleaned = strip_uuid_lines(raw_body);
        let raw_cues = self.tokenizer.tokenize(&cleaned)?;

        let (first, last) = match (raw_cues.first(), raw_cues.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => return Ok(Extraction::NoCues),
        };

        let total = raw_cues.len();
        let cues: Vec<NormalizedCue> = raw_cues.iter().filter_map(normalize).collect();

        if cues.len() < total {
            debug!("Dropped {} of {} cue(s) without speaker or text", total - cues.len(), total);
        }

        Ok(Extraction::Cues {
            cues,
            first_start: first,
            last_end: last,
        })
    }
}

/// Blank out `<uuid>/<int>-<int>` artifact lines
pub fn strip_uuid_lines(body: &str) -> Cow<'_, str> {
    UUID_LINE_REGEX.replace_all(body, "")
}

/// Speaker name from a leading `<v NAME>` marker
pub fn speaker_of(raw_text: &str) -> Option<String> {
    SPEAKER_REGEX
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Cue text with voice markers removed
pub fn clean_text(raw_text: &str) -> String {
    VOICE_TAG_REGEX.replace_all(raw_text, "").trim().to_string()
}

/// Normalize one cue; `None` means the cue is dropped
pub fn normalize(cue: &Cue) -> Option<NormalizedCue> {
    let speaker = speaker_of(&cue.raw_text)?;
    NormalizedCue::new(speaker, clean_text(&cue.raw_text), cue.start, cue.end)
}
