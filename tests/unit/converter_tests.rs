/*!
 * Tests for the conversion entry point
 */

use std::path::Path;
use vtt2md::converter::{convert_vtt_to_md, ConversionOptions, Converter};
use vtt2md::markdown_renderer::NO_CAPTIONS_DOCUMENT;
use vtt2md::app_config::Config;
use crate::common;

/// Test that default options match the documented defaults
#[test]
fn test_conversionOptions_default_shouldMatchConfigDefaults() {
    let options = ConversionOptions::default();

    assert_eq!(options.gap_threshold_seconds, 60);
    assert!(!options.remove_fillers);
    assert_eq!(options, ConversionOptions::from(&Config::default()));
}

/// Test that building a transcript exposes utterances and metadata
#[test]
fn test_build_withMergedCues_shouldReturnTranscript() {
    let transcript = Converter::default()
        .build(common::MERGED_VTT, Path::new("merged.vtt"), common::fixed_date())
        .unwrap()
        .expect("transcript expected");

    assert_eq!(transcript.utterances.len(), 2);
    assert_eq!(transcript.utterances[0].text, "This is the first part. And this is the second part.");
    assert_eq!(transcript.metadata.title, "merged");
    assert_eq!(transcript.metadata.participants, vec!["Speaker A", "Speaker B"]);
    assert_eq!(transcript.metadata.duration_minutes, 0);
}

/// Test that a header-only file builds to nothing
#[test]
fn test_build_withHeaderOnly_shouldReturnNone() {
    let result = Converter::default()
        .build(common::EMPTY_VTT, Path::new("empty.vtt"), common::fixed_date())
        .unwrap();

    assert!(result.is_none());
}

/// Test that invalid input becomes the error document instead of failing
#[test]
fn test_convert_withInvalidInput_shouldReturnErrorDocument() {
    let doc = convert_vtt_to_md("garbage", Path::new("bad.vtt"), common::fixed_date());

    assert!(doc.starts_with("# Conversion Error\n\nAn unexpected error occurred: "));
    assert!(doc.contains("WEBVTT"));
}

/// Test that zero cues produce the no-captions document
#[test]
fn test_convert_withHeaderOnly_shouldReturnNoCaptionsDocument() {
    let doc = convert_vtt_to_md(common::EMPTY_VTT, Path::new("empty.vtt"), common::fixed_date());
    assert_eq!(doc, NO_CAPTIONS_DOCUMENT);
}

/// Test that filler removal can be switched on through the options
#[test]
fn test_convert_withFillerRemoval_shouldDropFillers() {
    let body = common::build_vtt(&[
        ("00:00:01.000", "00:00:03.000", "<v A>えーと、始めます。</v>"),
        ("00:00:04.000", "00:00:05.000", "<v B>はい</v>"),
    ]);
    let converter = Converter::new(ConversionOptions {
        remove_fillers: true,
        ..ConversionOptions::default()
    });

    let doc = converter.convert(&body, Path::new("m.vtt"), common::fixed_date());

    assert!(doc.contains("**A** [00:00:01]  \n始めます。\n"));
    assert!(!doc.contains("**B**"));
    assert!(!doc.contains("- B"));
}

/// Test that parts of a long transcript each carry the header
#[test]
fn test_convertParts_withSmallBudget_shouldSplit() {
    let cues: Vec<(String, String, String)> = (0..40)
        .map(|i| {
            let start = format!("00:{:02}:{:02}.000", (i * 90) / 60, (i * 90) % 60);
            let end = format!("00:{:02}:{:02}.500", (i * 90) / 60, (i * 90) % 60);
            (start, end, format!("<v Speaker {}>{}</v>", i % 2, "議事".repeat(20)))
        })
        .collect();
    let refs: Vec<(&str, &str, &str)> = cues
        .iter()
        .map(|(s, e, p)| (s.as_str(), e.as_str(), p.as_str()))
        .collect();
    let body = common::build_vtt(&refs);

    let parts = Converter::default().convert_parts(&body, Path::new("long.vtt"), common::fixed_date(), 1000);

    assert!(parts.len() > 1);
    for part in &parts {
        assert!(part.starts_with("# long\n"));
        assert!(part.chars().count() <= 1000);
    }
}

/// Test that a zero budget becomes an error document
#[test]
fn test_convertParts_withZeroBudget_shouldReturnErrorDocument() {
    let parts = Converter::default().convert_parts(common::SIMPLE_VTT, Path::new("s.vtt"), common::fixed_date(), 0);

    assert_eq!(parts.len(), 1);
    assert!(parts[0].starts_with("# Conversion Error"));
}

/// Test that an out-of-range timestamp becomes the error document
#[test]
fn test_convert_withOverflowingTimestamp_shouldReturnErrorDocument() {
    let body = "WEBVTT\n\n00:00:01.000 --> 5124095576030:59:00.000\n<v A>hi\n";

    let doc = convert_vtt_to_md(body, Path::new("huge.vtt"), common::fixed_date());

    assert!(doc.starts_with("# Conversion Error\n\nAn unexpected error occurred: "));
    assert!(doc.contains("5124095576030:59:00.000"));
}
