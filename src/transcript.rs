/*!
 * Transcript input file handling.
 *
 * Audio decoding, silence detection and speech recognition happen outside
 * this tool; their combined output arrives as a JSON transcript listing the
 * non-silent intervals with the raw text recognized in each. Empty text is
 * legal and marks an interval where the recognizer found no speech.
 */

use std::collections::VecDeque;
use std::path::Path;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::timeline::{TimeInterval, Transcribe, Transcription};

/// One recognized segment: a non-silent interval plus its raw text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment start in seconds
    pub start: f64,

    /// Segment end in seconds
    pub end: f64,

    /// Raw transcribed text, possibly empty
    #[serde(default)]
    pub text: String,
}

/// A full transcript document as produced by the recognition step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Language code the audio was recognized in
    #[serde(default)]
    pub language: Option<String>,

    /// Recognized segments in ascending temporal order
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Load a transcript from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let transcript: Transcript = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse transcript file: {}", path.display()))?;
        Ok(transcript)
    }

    /// Validate segments into time intervals, dropping malformed ones.
    ///
    /// A segment whose start is not before its end is rejected with a warning
    /// and the rest of the batch continues.
    pub fn intervals(&self) -> Vec<TimeInterval> {
        let mut intervals = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match TimeInterval::new(segment.start, segment.end) {
                Ok(interval) => intervals.push(interval),
                Err(e) => warn!("Rejecting transcript segment: {}", e),
            }
        }

        intervals
    }

    /// Build the transcriber that replays this transcript's texts, aligned
    /// with the intervals returned by [`Transcript::intervals`]
    pub fn transcriber(&self) -> ScriptTranscriber {
        let texts = self
            .segments
            .iter()
            .filter(|s| TimeInterval::new(s.start, s.end).is_ok())
            .map(|s| s.text.clone())
            .collect();

        ScriptTranscriber {
            texts,
            progress: None,
        }
    }
}

/// Transcription collaborator that replays pre-recognized text.
///
/// The assembler calls it once per interval in order, so the replayed texts
/// stay aligned with their source segments.
pub struct ScriptTranscriber {
    texts: VecDeque<String>,
    progress: Option<ProgressBar>,
}

impl ScriptTranscriber {
    /// Attach a progress bar ticked once per transcribed interval
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl Transcribe for ScriptTranscriber {
    fn transcribe(&mut self, _interval: &TimeInterval) -> Result<Transcription> {
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }

        match self.texts.pop_front() {
            Some(text) if text.trim().is_empty() => Ok(Transcription::NoSpeech),
            Some(text) => Ok(Transcription::Text(text)),
            None => Ok(Transcription::NoSpeech),
        }
    }
}
