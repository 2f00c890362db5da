use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use log::warn;
use crate::errors::{SubtitleError, TimelineError};

// @module: Subtitle track model, SRT serialization and parsing

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2,}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// Convert a non-negative seconds value to whole milliseconds.
///
/// True fractional seconds are carried through to the millisecond field
/// rather than zeroed, so timestamps keep sub-second precision.
pub fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds * 1000.0).round() as u64
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text, lines joined with '\n'
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Create an entry from start/end times expressed in seconds
    pub fn from_seconds(seq_num: usize, start: f64, end: f64, text: String) -> Self {
        Self::new(seq_num, seconds_to_ms(start), seconds_to_ms(end), text)
    }

    /// Entry duration in milliseconds. Zero-duration entries are valid.
    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.split(&[':', ','][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow::anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        // Hours may exceed 24; the smaller fields must stay in range
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow::anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered collection of subtitle entries forming one subtitle file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleTrack {
    /// Create an empty track
    pub fn new() -> Self {
        SubtitleTrack { entries: Vec::new() }
    }

    /// Create a track from existing entries
    pub fn from_entries(entries: Vec<SubtitleEntry>) -> Self {
        SubtitleTrack { entries }
    }

    /// Number of entries in the track
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the track has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renumber entries to a contiguous 1-based sequence
    pub fn renumber(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }
    }

    /// Check the timeline invariants: within each entry start <= end, and
    /// consecutive entries never overlap.
    pub fn validate_timeline(&self) -> Result<(), TimelineError> {
        for entry in &self.entries {
            if entry.start_time_ms > entry.end_time_ms {
                return Err(TimelineError::NonMonotonicTimeline { seq_num: entry.seq_num });
            }
        }

        for pair in self.entries.windows(2) {
            if pair[0].end_time_ms > pair[1].start_time_ms {
                return Err(TimelineError::NonMonotonicTimeline { seq_num: pair[1].seq_num });
            }
        }

        Ok(())
    }

    /// Serialize the track to an SRT string
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            // Display never fails when writing to a String
            let _ = fmt::Write::write_fmt(&mut out, format_args!("{}", entry));
        }
        out
    }

    /// Write the track to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        Ok(())
    }

    /// Read and parse an SRT file
    pub fn parse_srt_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        let track = Self::parse_srt_string(&content)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;
        Ok(track)
    }

    /// Parse SRT content into a track.
    ///
    /// The parser is the exact inverse of serialization: entry order, sequence
    /// numbers, multi-line text and zero-duration entries are all preserved, so
    /// re-serializing a parsed track reproduces the input. A block missing its
    /// sequence number or timestamp line fails the whole parse; a partially
    /// parsed track is not meaningful.
    pub fn parse_srt_string(content: &str) -> Result<Self, SubtitleError> {
        let mut entries = Vec::new();
        let mut lines = content.lines().enumerate().peekable();

        loop {
            // Skip blank lines between blocks
            while let Some((_, line)) = lines.peek() {
                if line.trim().is_empty() {
                    lines.next();
                } else {
                    break;
                }
            }

            let Some((line_idx, seq_line)) = lines.next() else {
                break;
            };

            let seq_num: usize = seq_line.trim().parse().map_err(|_| SubtitleError::MalformedBlock {
                line: line_idx + 1,
                message: format!("expected sequence number, found '{}'", seq_line.trim()),
            })?;

            let Some((ts_idx, ts_line)) = lines.next() else {
                return Err(SubtitleError::MalformedBlock {
                    line: line_idx + 1,
                    message: "block ends before timestamp line".to_string(),
                });
            };

            let caps = TIMESTAMP_REGEX.captures(ts_line.trim()).ok_or_else(|| {
                SubtitleError::InvalidTimestamp {
                    line: ts_idx + 1,
                    text: ts_line.trim().to_string(),
                }
            })?;

            let start_time_ms = Self::capture_to_ms(&caps, 1);
            let end_time_ms = Self::capture_to_ms(&caps, 5);

            // Text lines run until the blank separator or end of input
            let mut text_lines: Vec<&str> = Vec::new();
            while let Some((_, line)) = lines.peek() {
                if line.trim().is_empty() {
                    break;
                }
                text_lines.push(line);
                lines.next();
            }

            entries.push(SubtitleEntry::new(
                seq_num,
                start_time_ms,
                end_time_ms,
                text_lines.join("\n"),
            ));
        }

        if entries.is_empty() && !content.trim().is_empty() {
            warn!("SRT content contained no subtitle blocks");
        }

        Ok(SubtitleTrack { entries })
    }

    /// Sum timestamp fields from a regex capture starting at the given group
    fn capture_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
        let field = |idx: usize| -> u64 {
            caps.get(idx).map_or(0, |m| m.as_str().parse().unwrap_or(0))
        };

        let hours = field(start_idx);
        let minutes = field(start_idx + 1);
        let seconds = field(start_idx + 2);
        let millis = field(start_idx + 3);

        (hours * 3600 + minutes * 60 + seconds) * 1000 + millis
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
