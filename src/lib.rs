/*!
 * # vtt2md - WebVTT meeting captions to Markdown minutes
 *
 * A Rust library that turns the WebVTT caption files exported by online
 * meeting tools into readable Markdown meeting minutes.
 *
 * ## Features
 *
 * - Tolerant WebVTT tokenizing (header metadata, NOTE/STYLE blocks, cue identifiers)
 * - Removal of the per-cue UUID identifiers emitted by Microsoft Teams
 * - Speaker detection from `<v NAME>` voice tags
 * - Merging of consecutive same-speaker cues separated by short pauses
 * - Participant list, meeting duration and date derivation
 * - Optional filler-word removal
 * - Optional splitting of long transcripts into several documents
 * - Folder mode with parallel conversion
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `caption_parser`: WebVTT tokenizing into raw cues and timestamps
 * - `cue_extractor`: UUID-line stripping, speaker and text normalization
 * - `filler_filter`: Optional filler-word removal
 * - `transcript`: Utterance merging and document metadata
 * - `markdown_renderer`: Markdown layout and placeholder documents
 * - `converter`: Never-failing conversion entry point
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod caption_parser;
pub mod cue_extractor;
pub mod filler_filter;
pub mod transcript;
pub mod markdown_renderer;
pub mod converter;
pub mod file_utils;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use caption_parser::{Cue, Timestamp};
pub use cue_extractor::{CueExtractor, NormalizedCue};
pub use transcript::{DocumentDate, TranscriptBuilder, TranscriptMetadata, Utterance};
pub use converter::{convert_vtt_to_md, ConversionOptions, Converter};
pub use errors::{AppError, CaptionError, ConversionError};
