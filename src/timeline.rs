/*!
 * Timeline synthesis: proportional time allocation and track assembly.
 *
 * The allocator subdivides a non-silent audio interval among text chunks in
 * proportion to their word weight. The assembler drives chunking and
 * allocation across all intervals in temporal order, then closes the gaps
 * between consecutive entries so each subtitle stays visible until the next
 * one appears.
 */

use anyhow::Result;
use log::{debug, warn};

use crate::errors::TimelineError;
use crate::subtitle_track::{SubtitleEntry, SubtitleTrack};
use crate::text_chunker::{chunk_text, TextChunk};

/// A contiguous span of non-silent audio, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    start: f64,
    end: f64,
}

impl TimeInterval {
    /// Create a validated interval. Start must be non-negative and strictly
    /// before end.
    pub fn new(start: f64, end: f64) -> Result<Self, TimelineError> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || start >= end {
            return Err(TimelineError::MalformedInterval { start, end });
        }
        Ok(TimeInterval { start, end })
    }

    /// Interval start in seconds
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Interval end in seconds
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Interval length in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Outcome of a transcription call for one interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcription {
    /// Recognized text for the interval
    Text(String),
    /// The recognizer found no speech; the interval contributes nothing
    NoSpeech,
}

/// Speech-to-text collaborator interface.
///
/// Implementations are called once per interval, in ascending temporal
/// order. Returning `NoSpeech` (or an error) skips the interval without
/// aborting the batch; the recognizer cannot be assumed to return reliable
/// punctuation.
pub trait Transcribe {
    /// Transcribe the audio covered by the given interval
    fn transcribe(&mut self, interval: &TimeInterval) -> Result<Transcription>;
}

/// A chunk with its allocated share of the parent interval, in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedChunk {
    /// Allocated start in seconds
    pub start: f64,
    /// Allocated end in seconds
    pub end: f64,
    /// The display chunk owning this sub-interval
    pub chunk: TextChunk,
}

/// Subdivide an interval among chunks proportionally to word weight.
///
/// Each chunk receives `duration * weight / total_weight` seconds, carried
/// forward by a running cursor, so the emitted sub-intervals exactly tile the
/// parent interval with no gap or overlap. Word density stands in for
/// speaking rate. Fails with `ZeroWeightChunks` when no chunk carries any
/// words; callers treat that the same as an empty transcription and skip.
pub fn allocate(interval: &TimeInterval, chunks: &[TextChunk]) -> Result<Vec<AllocatedChunk>, TimelineError> {
    let total_words: usize = chunks.iter().map(|c| c.word_weight()).sum();
    if total_words == 0 {
        return Err(TimelineError::ZeroWeightChunks);
    }

    let duration = interval.duration();
    let mut cursor = interval.start();
    let mut allocated = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let share = duration * (chunk.word_weight() as f64 / total_words as f64);
        allocated.push(AllocatedChunk {
            start: cursor,
            end: cursor + share,
            chunk: chunk.clone(),
        });
        cursor += share;
    }

    Ok(allocated)
}

/// Drives chunking and allocation across all intervals and assembles the
/// final subtitle track.
#[derive(Debug, Clone)]
pub struct TimelineAssembler {
    /// Maximum characters per subtitle line
    max_line_width: usize,
    /// Maximum lines per subtitle entry
    max_lines_per_entry: usize,
}

impl TimelineAssembler {
    /// Create an assembler with the given display bounds
    pub fn new(max_line_width: usize, max_lines_per_entry: usize) -> Self {
        TimelineAssembler {
            max_line_width,
            max_lines_per_entry,
        }
    }

    /// Assemble a subtitle track from non-silent intervals and a transcriber.
    ///
    /// Intervals are processed strictly in the order given. An interval whose
    /// transcription is empty, carries no words, or fails outright is skipped;
    /// its time range is simply absent from the provisional sequence. After
    /// all intervals are processed, every entry's end time is stretched to the
    /// start of the next entry (the allocator-computed end survives only for
    /// the final entry), and sequence numbers are assigned 1..N in emission
    /// order.
    pub fn assemble<T: Transcribe>(
        &self,
        intervals: &[TimeInterval],
        transcriber: &mut T,
    ) -> Result<SubtitleTrack> {
        let mut provisional: Vec<AllocatedChunk> = Vec::new();

        for interval in intervals {
            let text = match transcriber.transcribe(interval) {
                Ok(Transcription::Text(text)) => text,
                Ok(Transcription::NoSpeech) => {
                    debug!("No speech detected in [{:.3}s, {:.3}s], skipping",
                           interval.start(), interval.end());
                    continue;
                }
                Err(e) => {
                    warn!("Transcription failed for [{:.3}s, {:.3}s], skipping: {}",
                          interval.start(), interval.end(), e);
                    continue;
                }
            };

            if text.trim().is_empty() {
                debug!("Empty transcription for [{:.3}s, {:.3}s], skipping",
                       interval.start(), interval.end());
                continue;
            }

            let chunks = chunk_text(&text, self.max_line_width, self.max_lines_per_entry);

            match allocate(interval, &chunks) {
                Ok(allocated) => provisional.extend(allocated),
                Err(TimelineError::ZeroWeightChunks) => {
                    debug!("No words recognized in [{:.3}s, {:.3}s], skipping",
                           interval.start(), interval.end());
                }
                Err(e) => return Err(e.into()),
            }
        }

        let track = Self::close_gaps(&provisional);

        // Assembly must never emit an overlapping or backwards timeline
        track.validate_timeline()?;

        Ok(track)
    }

    /// Build final entries from the provisional flat sequence, replacing each
    /// entry's end with the next entry's start. The smoothing runs in the
    /// millisecond domain so consecutive entries meet exactly.
    fn close_gaps(provisional: &[AllocatedChunk]) -> SubtitleTrack {
        let mut entries = Vec::with_capacity(provisional.len());

        for (i, alloc) in provisional.iter().enumerate() {
            let end = match provisional.get(i + 1) {
                Some(next) => next.start,
                None => alloc.end,
            };

            entries.push(SubtitleEntry::from_seconds(i + 1, alloc.start, end, alloc.chunk.joined_text()));
        }

        SubtitleTrack::from_entries(entries)
    }
}
