/*!
 * Tests for filler-word removal
 */

use vtt2md::caption_parser::Timestamp;
use vtt2md::cue_extractor::NormalizedCue;
use vtt2md::filler_filter::FillerFilter;

fn cue(text: &str) -> NormalizedCue {
    NormalizedCue::new("A", text, Timestamp::from_millis(0), Timestamp::from_millis(1000)).unwrap()
}

/// Test that leading Japanese fillers are removed
#[test]
fn test_clean_withLeadingFillers_shouldKeepContent() {
    let filter = FillerFilter::default();
    assert_eq!(filter.clean("えー、本日の議題です。"), "本日の議題です。");
    assert_eq!(filter.clean("まあ、そうですね"), "そうですね");
}

/// Test that words which only contain a filler survive
#[test]
fn test_clean_withFillerInsideWord_shouldNotTouchIt() {
    let filter = FillerFilter::default();
    assert_eq!(filter.clean("あの人が担当です"), "あの人が担当です");
    assert_eq!(filter.clean("umbrella stand"), "umbrella stand");
}

/// Test English fillers, case-insensitive
#[test]
fn test_clean_withEnglishFillers_shouldRemoveThem() {
    let filter = FillerFilter::default();
    assert_eq!(filter.clean("Um, I think uh we should ship."), "I think we should ship.");
}

/// Test a custom word list
#[test]
fn test_clean_withCustomWords_shouldOnlyUseThem() {
    let filter = FillerFilter::new(["like"]);
    assert_eq!(filter.clean("it was, like, fine"), "it was, fine");
    assert_eq!(filter.clean("um okay"), "um okay");
}

/// Test that cues consisting only of backchannels disappear
#[test]
fn test_apply_withBackchannelOnlyCue_shouldDropIt() {
    let filter = FillerFilter::default();

    let cleaned = filter.apply(vec![cue("はい"), cue("うん、なるほど。"), cue("えっと、次へ進みます")]);

    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].text(), "次へ進みます");
}
