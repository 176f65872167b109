/*!
 * Optional removal of filler words and stand-alone backchannel replies.
 *
 * Text is cut into clause segments at punctuation and whitespace. A segment
 * is dropped only when the whole segment is a filler, so words that merely
 * start with one (for example "あの人") are kept.
 */

use std::collections::HashSet;
use log::debug;

use crate::cue_extractor::NormalizedCue;

/// Fillers and backchannels removed by default
pub const DEFAULT_FILLER_WORDS: &[&str] = &[
    "えー", "えーと", "えーっと", "えっと", "あの", "あのー", "その", "まあ", "うーん",
    "なんか", "はい", "うん", "ええ", "なるほど", "um", "uh", "erm", "hmm",
];

// @const: Elongation marks ignored when comparing segments
const ELONGATION_MARKS: &[char] = &['ー', '～', '〜', '~', '…', '-'];

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '、' | '。' | '，' | '．' | ',' | '.' | '!' | '?' | '！' | '？')
}

fn is_trailing_comma(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '、' | '，' | ',')
}

fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase().trim_end_matches(ELONGATION_MARKS).to_string()
}

/// Removes configured filler words from cue text
#[derive(Debug, Clone)]
pub struct FillerFilter {
    words: HashSet<String>,
}

impl Default for FillerFilter {
    fn default() -> Self {
        Self::new(DEFAULT_FILLER_WORDS.iter().copied())
    }
}

impl FillerFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize_word(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        FillerFilter { words }
    }

    fn is_filler(&self, segment: &str) -> bool {
        let normalized = normalize_word(segment);
        !normalized.is_empty() && self.words.contains(&normalized)
    }

    /// Remove filler segments from a piece of text
    pub fn clean(&self, text: &str) -> String {
        // (segment content, delimiters that end it)
        let mut segments: Vec<(String, String)> = Vec::new();
        let mut content = String::new();
        let mut delimiters = String::new();

        for ch in text.chars() {
            if is_delimiter(ch) {
                delimiters.push(ch);
            } else {
                if !delimiters.is_empty() {
                    segments.push((std::mem::take(&mut content), std::mem::take(&mut delimiters)));
                }
                content.push(ch);
            }
        }
        if !content.is_empty() || !delimiters.is_empty() {
            segments.push((content, delimiters));
        }

        let kept: String = segments
            .into_iter()
            .filter(|(content, _)| !self.is_filler(content))
            .map(|(content, delimiters)| content + &delimiters)
            .collect();

        kept.trim_start_matches(is_delimiter)
            .trim_end_matches(is_trailing_comma)
            .to_string()
    }

    /// Clean every cue, dropping the ones left without text
    pub fn apply(&self, cues: Vec<NormalizedCue>) -> Vec<NormalizedCue> {
        let before = cues.len();
        let cleaned: Vec<NormalizedCue> = cues
            .into_iter()
            .filter_map(|cue| {
                let text = self.clean(cue.text());
                cue.with_text(text)
            })
            .collect();

        if cleaned.len() < before {
            debug!("Filler removal dropped {} of {} cue(s)", before - cleaned.len(), before);
        }
        cleaned
    }
}
