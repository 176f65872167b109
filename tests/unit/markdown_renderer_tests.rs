/*!
 * Tests for Markdown rendering
 */

use vtt2md::caption_parser::Timestamp;
use vtt2md::markdown_renderer::{error_document, render, render_parts, NO_CAPTIONS_DOCUMENT};
use vtt2md::transcript::{DocumentDate, TranscriptMetadata, Utterance};
use crate::common;

fn metadata(date: DocumentDate) -> TranscriptMetadata {
    TranscriptMetadata {
        title: "定例会議".to_string(),
        participants: vec!["佐藤".to_string(), "山田".to_string()],
        duration_minutes: 45,
        date,
    }
}

fn utterance(speaker: &str, text: &str, start_ms: u64) -> Utterance {
    Utterance {
        speaker: speaker.to_string(),
        text: text.to_string(),
        start: Timestamp::from_millis(start_ms),
        end: Timestamp::from_millis(start_ms + 5_000),
    }
}

/// Test that the header carries title, date, participants and duration
#[test]
fn test_render_withJapaneseMetadata_shouldProduceHeader() {
    let doc = render(&metadata(common::fixed_date()), &[]);

    assert_eq!(
        doc,
        "# 定例会議\n\n**日時:** 2024年05月01日\n**参加者:**\n- 佐藤\n- 山田\n\n**所要時間:** 45分\n\n## 発言記録\n"
    );
}

/// Test that an explicit meeting time is shown with hours and minutes
#[test]
fn test_render_withMeetingDate_shouldShowTime() {
    let meeting = DocumentDate::parse_meeting("2024-06-10 13:05").unwrap();

    let doc = render(&metadata(meeting), &[]);

    assert!(doc.contains("**日時:** 2024年06月10日 13:05\n"));
}

/// Test that statement times are truncated, hours included
#[test]
fn test_render_withLongMeeting_shouldTruncateStartTimes() {
    let doc = render(
        &metadata(common::fixed_date()),
        &[utterance("山田", "終わります。", 3_725_999)],
    );

    assert!(doc.ends_with("**山田** [01:02:05]  \n終わります。\n"));
}

/// Test that the same input always renders the same document
#[test]
fn test_render_withSameInput_shouldBeDeterministic() {
    let meta = metadata(common::fixed_date());
    let utterances = vec![utterance("佐藤", "a", 0), utterance("山田", "b", 9_000)];

    assert_eq!(render(&meta, &utterances), render(&meta, &utterances));
}

/// Test that split parts keep every statement exactly once and in order
#[test]
fn test_renderParts_shouldPreserveStatementOrder() {
    let meta = metadata(common::fixed_date());
    let utterances: Vec<Utterance> = (0..30)
        .map(|i| utterance("佐藤", &format!("発言{:02}", i), i * 10_000))
        .collect();
    let budget = render(&meta, &[]).chars().count() + 100;

    let parts = render_parts(&meta, &utterances, budget).unwrap();

    let joined = parts.join("");
    let mut last_pos = 0;
    for i in 0..30 {
        let marker = format!("発言{:02}", i);
        let pos = joined.find(&marker).expect("statement missing");
        assert!(pos >= last_pos);
        assert_eq!(joined.matches(&marker).count(), 1);
        last_pos = pos;
    }
}

/// Test the placeholder documents
#[test]
fn test_placeholderDocuments_shouldHaveFixedLayout() {
    assert_eq!(NO_CAPTIONS_DOCUMENT, "# Conversion Error\n\nCould not find any captions in the VTT file.");
    assert_eq!(
        error_document("boom"),
        "# Conversion Error\n\nAn unexpected error occurred: boom"
    );
}
