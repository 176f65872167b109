use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};
use crate::errors::CaptionError;

// @module: WebVTT caption tokenizing

// @const: Cue timing line, "START --> END [settings]"
static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+-->\s+(\S+)").unwrap()
});

// @const: WebVTT timestamp, hours optional
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+):)?(\d{2}):(\d{2})\.(\d{3})$").unwrap()
});

/// Position within a caption file, millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    millis: u64,
}

impl Timestamp {
    /// Creates a timestamp from milliseconds since file start
    pub fn from_millis(millis: u64) -> Self {
        Timestamp { millis }
    }

    /// Creates a timestamp from clock components
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        Timestamp {
            millis: hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis,
        }
    }

    /// Parse `HH:MM:SS.mmm` or `MM:SS.mmm`
    ///
    /// Returns `None` when the text is not a valid WebVTT timestamp.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = TIMESTAMP_REGEX.captures(value.trim())?;

        let hours: u64 = match caps.get(1) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let minutes: u64 = caps.get(2)?.as_str().parse().ok()?;
        let seconds: u64 = caps.get(3)?.as_str().parse().ok()?;
        let millis: u64 = caps.get(4)?.as_str().parse().ok()?;

        if minutes >= 60 || seconds >= 60 {
            return None;
        }

        hours
            .checked_mul(3_600_000)
            .and_then(|h| h.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .map(Timestamp::from_millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Seconds since file start with the fractional part discarded
    pub fn whole_seconds(&self) -> u64 {
        self.millis / 1_000
    }

    /// Clock rendering at whole-second precision (HH:MM:SS)
    pub fn format_clock(&self) -> String {
        let total = self.whole_seconds();
        format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:03}", self.format_clock(), self.millis % 1_000)
    }
}

// @struct: Single timed caption as emitted by a tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    // @field: Start of the cue
    pub start: Timestamp,

    // @field: End of the cue
    pub end: Timestamp,

    // @field: Payload lines joined with '\n', inline markup untouched
    pub raw_text: String,
}

impl Cue {
    pub fn new(start: Timestamp, end: Timestamp, raw_text: impl Into<String>) -> Self {
        Cue {
            start,
            end,
            raw_text: raw_text.into(),
        }
    }
}

/// Turns a caption body into an ordered sequence of cues
pub trait CueTokenizer {
    fn tokenize(&self, body: &str) -> Result<Vec<Cue>, CaptionError>;
}

/// Tokenizer for the WebVTT subset produced by conferencing tools
///
/// Handles the `WEBVTT` header (with optional BOM), optional cue identifiers,
/// cue settings after the end timestamp, and skips `NOTE`, `STYLE` and
/// `REGION` blocks. Reference: https://www.w3.org/TR/webvtt1/
#[derive(Debug, Clone, Copy, Default)]
pub struct WebVttTokenizer;

impl CueTokenizer for WebVttTokenizer {
    fn tokenize(&self, body: &str) -> Result<Vec<Cue>, CaptionError> {
        let lines: Vec<&str> = body.lines().collect();

        let header = lines
            .first()
            .map(|line| line.trim_start_matches('\u{FEFF}').trim())
            .unwrap_or("");
        if !header.starts_with("WEBVTT") {
            let shown: String = header.chars().take(40).collect();
            return Err(CaptionError::MissingHeader(if shown.is_empty() {
                "empty caption body".to_string()
            } else {
                shown
            }));
        }

        // Header metadata runs until the first blank line, but some exporters
        // put the first cue directly under the header.
        let mut i = 1;
        while i < lines.len() && !lines[i].trim().is_empty() && !Self::is_timing_line(lines[i]) {
            i += 1;
        }

        let mut cues = Vec::new();
        while i < lines.len() {
            let line = lines[i].trim();
            if line.is_empty() {
                i += 1;
                continue;
            }

            if Self::is_metadata_block(line) {
                i = Self::skip_block(&lines, i);
                continue;
            }

            let cue = Self::parse_cue(&lines, &mut i)?;
            cues.push(cue);
        }

        debug!("Tokenized {} cue(s)", cues.len());
        Ok(cues)
    }
}

impl WebVttTokenizer {
    fn is_timing_line(line: &str) -> bool {
        line.contains("-->")
    }

    fn is_metadata_block(line: &str) -> bool {
        ["NOTE", "STYLE", "REGION"].iter().any(|keyword| {
            line.strip_prefix(keyword)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        })
    }

    fn skip_block(lines: &[&str], mut index: usize) -> usize {
        index += 1;
        while index < lines.len() && !lines[index].trim().is_empty() {
            index += 1;
        }
        index
    }

    fn parse_cue(lines: &[&str], index: &mut usize) -> Result<Cue, CaptionError> {
        let block_start = *index;
        let mut timing_line = lines[*index].trim();

        if !Self::is_timing_line(timing_line) {
            // First line is a cue identifier, the timing line must follow
            *index += 1;
            match lines.get(*index).map(|line| line.trim()) {
                Some(next) if Self::is_timing_line(next) => timing_line = next,
                _ => {
                    return Err(CaptionError::MalformedBlock {
                        line: block_start + 1,
                        content: lines[block_start].trim().to_string(),
                    });
                }
            }
        }

        let (start, end) = Self::parse_timing_line(timing_line, *index + 1)?;
        if end < start {
            warn!("Cue at line {} ends before it starts ({} --> {})", *index + 1, start, end);
        }
        *index += 1;

        let mut payload = Vec::new();
        while *index < lines.len() && !lines[*index].trim().is_empty() {
            payload.push(lines[*index].trim_end());
            *index += 1;
        }

        Ok(Cue::new(start, end, payload.join("\n")))
    }

    fn parse_timing_line(line: &str, line_number: usize) -> Result<(Timestamp, Timestamp), CaptionError> {
        let caps = TIMING_LINE_REGEX.captures(line).ok_or_else(|| CaptionError::InvalidTimestamp {
            value: line.to_string(),
            line: line_number,
        })?;

        let parse = |idx: usize| {
            let value = caps.get(idx).map_or("", |m| m.as_str());
            Timestamp::parse(value).ok_or_else(|| CaptionError::InvalidTimestamp {
                value: value.to_string(),
                line: line_number,
            })
        };

        Ok((parse(1)?, parse(2)?))
    }
}
