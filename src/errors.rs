/*!
 * Error types for the vtt2md application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while tokenizing a caption file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptionError {
    /// The body does not start with a WEBVTT header line
    #[error("Missing WEBVTT header: {0}")]
    MissingHeader(String),

    /// A timestamp could not be parsed
    #[error("Invalid timestamp '{value}' at line {line}")]
    InvalidTimestamp {
        /// The offending timestamp text
        value: String,
        /// 1-based line number in the caption body
        line: usize,
    },

    /// A block is neither a cue nor a recognized metadata block
    #[error("Malformed cue block at line {line}: {content}")]
    MalformedBlock {
        /// 1-based line number where the block starts
        line: usize,
        /// First line of the block
        content: String,
    },
}

/// Errors that can occur while converting captions to a transcript
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Error with caption tokenization or extraction
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// An option passed to the converter is out of range
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration file or command line
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from caption conversion
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
