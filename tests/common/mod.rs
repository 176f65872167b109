/*!
 * Common test utilities for the vtt2md test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use chrono::NaiveDate;
use tempfile::TempDir;

use vtt2md::transcript::DocumentDate;

/// Two speakers, three cues, the last one far enough away to start a new statement
pub const SIMPLE_VTT: &str = "WEBVTT

00:00:01.000 --> 00:00:05.000
<v Speaker A>Hello everyone.</v>

00:00:06.000 --> 00:00:10.000
<v Speaker B>Hi, thanks for joining.</v>

00:01:20.000 --> 00:01:25.000
<v Speaker A>Let's get started.</v>
";

/// Consecutive cues of one speaker that merge into one statement
pub const MERGED_VTT: &str = "WEBVTT

00:00:01.000 --> 00:00:03.000
<v Speaker A>This is the first part.</v>

00:00:04.000 --> 00:00:06.000
<v Speaker A>And this is the second part.</v>

00:00:07.000 --> 00:00:09.000
<v Speaker B>I agree.</v>
";

/// Export as produced by Microsoft Teams, with UUID identifier lines
pub const TEAMS_VTT: &str = "WEBVTT

0f3c2a1e-9b7d-4c2e-8a51-2d6f0e4b9c13/12-0
00:00:01.000 --> 00:00:04.000
<v 山田 太郎>本日の議題を確認します。</v>

0f3c2a1e-9b7d-4c2e-8a51-2d6f0e4b9c13/13-0
00:00:05.000 --> 00:00:08.000
<v 山田 太郎>まず予算についてです。</v>

7a1d4b20-3e5f-4a6b-9c8d-0e1f2a3b4c5d/20-1
00:00:10.000 --> 00:00:14.000
<v 佐藤 花子>承知しました。</v>
";

/// Cues without a speaker tag
pub const NO_SPEAKER_VTT: &str = "WEBVTT

00:00:01.000 --> 00:00:02.000
Just some text without a speaker.

00:00:03.000 --> 00:00:04.000
<v Speaker A>This one has a speaker.</v>
";

/// Header only
pub const EMPTY_VTT: &str = "WEBVTT\n";

/// Routes library logging to the test output, once per process
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample caption file for testing
pub fn create_test_caption(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SIMPLE_VTT)
}

/// Fixed file date used where rendering must be deterministic
pub fn fixed_date() -> DocumentDate {
    let at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid date");
    DocumentDate::FileModified(at)
}

/// Builds a caption body from `(start, end, payload)` triples
pub fn build_vtt(cues: &[(&str, &str, &str)]) -> String {
    let mut body = String::from("WEBVTT\n");
    for (start, end, payload) in cues {
        body.push_str(&format!("\n{} --> {}\n{}\n", start, end, payload));
    }
    body
}
