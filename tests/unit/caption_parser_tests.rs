/*!
 * Tests for WebVTT tokenizing
 */

use vtt2md::caption_parser::{Cue, CueTokenizer, Timestamp, WebVttTokenizer};
use vtt2md::errors::CaptionError;
use crate::common;

/// Test that a typical export yields every cue in file order
#[test]
fn test_tokenize_withSimpleFile_shouldReturnCuesInOrder() {
    let cues = WebVttTokenizer.tokenize(common::SIMPLE_VTT).unwrap();

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0].start, Timestamp::from_hms(0, 0, 1, 0));
    assert_eq!(cues[0].raw_text, "<v Speaker A>Hello everyone.</v>");
    assert_eq!(cues[2].end, Timestamp::from_hms(0, 1, 25, 0));
    assert!(cues.windows(2).all(|w| w[0].start <= w[1].start));
}

/// Test that multi-line payloads are kept with their line breaks
#[test]
fn test_tokenize_withMultilinePayload_shouldJoinWithNewline() {
    let body = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n<v A>first line\nsecond line</v>\n";

    let cues = WebVttTokenizer.tokenize(body).unwrap();

    assert_eq!(cues, vec![Cue::new(
        Timestamp::from_millis(1_000),
        Timestamp::from_millis(2_000),
        "<v A>first line\nsecond line</v>",
    )]);
}

/// Test that short timestamps without hours are accepted
#[test]
fn test_tokenize_withShortTimestamps_shouldParse() {
    let body = "WEBVTT\n\n01:02.500 --> 01:04.000 align:start\n<v A>short form</v>\n";

    let cues = WebVttTokenizer.tokenize(body).unwrap();

    assert_eq!(cues[0].start, Timestamp::from_hms(0, 1, 2, 500));
    assert_eq!(cues[0].end, Timestamp::from_hms(0, 1, 4, 0));
}

/// Test that a file without the WEBVTT signature is rejected
#[test]
fn test_tokenize_withSrtContent_shouldFailWithMissingHeader() {
    let srt = "1\n00:00:01,000 --> 00:00:04,000\nHello\n";

    let result = WebVttTokenizer.tokenize(srt);

    assert!(matches!(result, Err(CaptionError::MissingHeader(_))));
}

/// Test that comma millisecond separators inside a WebVTT file are rejected
#[test]
fn test_tokenize_withCommaSeparator_shouldFailWithInvalidTimestamp() {
    let body = "WEBVTT\n\n00:00:01,000 --> 00:00:04,000\n<v A>Hello</v>\n";

    let result = WebVttTokenizer.tokenize(body);

    assert_eq!(
        result,
        Err(CaptionError::InvalidTimestamp {
            value: "00:00:01,000".to_string(),
            line: 3,
        })
    );
}

/// Test formatting helpers of the timestamp type
#[test]
fn test_timestamp_formatting_shouldTruncateToSeconds() {
    let ts = Timestamp::from_hms(1, 2, 3, 999);

    assert_eq!(ts.format_clock(), "01:02:03");
    assert_eq!(ts.to_string(), "01:02:03.999");
    assert_eq!(ts.whole_seconds(), 3723);
    assert_eq!(ts.as_millis(), 3_723_999);
}
