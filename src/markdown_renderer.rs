use crate::errors::ConversionError;
use crate::transcript::{TranscriptMetadata, Utterance};

// @module: Markdown meeting-minutes rendering

/// Document returned when the caption file contains no cues
pub const NO_CAPTIONS_DOCUMENT: &str = "# Conversion Error\n\nCould not find any captions in the VTT file.";

/// Placeholder document embedding a failure description
pub fn error_document(description: &str) -> String {
    format!("# Conversion Error\n\nAn unexpected error occurred: {}", description)
}

/// Render the whole transcript as one Markdown document
pub fn render(metadata: &TranscriptMetadata, utterances: &[Utterance]) -> String {
    let mut lines = header_lines(metadata);
    for utterance in utterances {
        lines.push(block(utterance));
    }
    lines.join("\n")
}

/// Render the transcript as several documents of at most `max_chars` characters
///
/// Every part repeats the header. Utterance blocks are never split, so a block
/// that is larger than the budget on its own ends up alone in a part that
/// exceeds it.
pub fn render_parts(
    metadata: &TranscriptMetadata,
    utterances: &[Utterance],
    max_chars: usize,
) -> Result<Vec<String>, ConversionError> {
    if max_chars == 0 {
        return Err(ConversionError::InvalidOption(
            "max_chars_per_part must be greater than zero".to_string(),
        ));
    }

    let header = header_lines(metadata).join("\n");
    let header_len = header.chars().count();

    let mut parts: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = header_len;

    for utterance in utterances {
        let block = block(utterance);
        // +1 for the joining newline
        let cost = block.chars().count() + 1;

        if !current.is_empty() && current_len + cost > max_chars {
            parts.push(std::mem::take(&mut current));
            current_len = header_len;
        }

        current.push(block);
        current_len += cost;
    }

    if !current.is_empty() || parts.is_empty() {
        parts.push(current);
    }

    Ok(parts
        .into_iter()
        .map(|blocks| {
            let mut lines = Vec::with_capacity(blocks.len() + 1);
            lines.push(header.clone());
            lines.extend(blocks);
            lines.join("\n")
        })
        .collect())
}

/// Concatenate split documents into one text with a horizontal rule between parts
pub fn join_parts(parts: &[String]) -> String {
    parts.join(PART_SEPARATOR)
}

const PART_SEPARATOR: &str = "\n---\n\n";

fn header_lines(metadata: &TranscriptMetadata) -> Vec<String> {
    let mut lines = vec![
        format!("# {}\n", metadata.title),
        format!("**日時:** {}", metadata.date.render()),
        "**参加者:**".to_string(),
    ];
    lines.extend(metadata.participants.iter().map(|p| format!("- {}", p)));
    lines.push(format!("\n**所要時間:** {}分\n", metadata.duration_minutes));
    lines.push("## 発言記録\n".to_string());
    lines
}

// Two trailing spaces force a Markdown line break before the text
fn block(utterance: &Utterance) -> String {
    format!(
        "**{}** [{}]  \n{}\n",
        utterance.speaker,
        utterance.start.format_clock(),
        utterance.text
    )
}
