/*!
 * Error types for the subsynth application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur during timeline synthesis
#[derive(Error, Debug)]
pub enum TimelineError {
    /// An interval whose start is not strictly before its end
    #[error("Malformed interval: start {start}s is not before end {end}s")]
    MalformedInterval {
        /// Interval start in seconds
        start: f64,
        /// Interval end in seconds
        end: f64,
    },

    /// All chunks passed to the allocator carry zero word weight
    #[error("Cannot allocate time across chunks with zero total word weight")]
    ZeroWeightChunks,

    /// Post-condition violated after assembly: entries overlap or run backwards
    #[error("Non-monotonic timeline at entry {seq_num}")]
    NonMonotonicTimeline {
        /// Sequence number of the offending entry
        seq_num: usize,
    },
}

/// Errors that can occur when parsing or writing subtitle files
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A block in the SRT input is missing a required field or is malformed
    #[error("Malformed SRT block at line {line}: {message}")]
    MalformedBlock {
        /// 1-based line number in the input
        line: usize,
        /// Description of what was expected
        message: String,
    },

    /// A timestamp could not be parsed
    #[error("Invalid timestamp at line {line}: {text}")]
    InvalidTimestamp {
        /// 1-based line number in the input
        line: usize,
        /// The offending timestamp text
        text: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from timeline synthesis
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// Error from subtitle parsing or writing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

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
