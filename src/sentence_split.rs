/*!
 * Sentence-level re-segmentation of an assembled subtitle track.
 *
 * Entries whose text spans multiple sentences are split into one entry per
 * sentence, dividing the original entry's duration equally across the
 * sentences. Equal division is deliberate: the chunk-level allocator weighs
 * by word count, the sentence stage does not.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::subtitle_track::{SubtitleEntry, SubtitleTrack};

// @const: Sentence boundary: terminal punctuation, optional closing quote
// or bracket, then whitespace
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]+["')\]]*\s+"#).unwrap()
});

/// Sentence-boundary collaborator interface.
///
/// Splits text into an ordered sequence of sentences whose concatenation
/// (joined with single spaces) approximates the input. Un-punctuated text
/// comes back as a single sentence.
pub trait SplitSentences {
    /// Split the given text into sentences
    fn split(&self, text: &str) -> Vec<String>;
}

/// Rule-based sentence splitter on terminal punctuation
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSentenceSplitter;

impl SplitSentences for RuleSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut last = 0;

        for boundary in SENTENCE_BOUNDARY.find_iter(text) {
            let sentence = text[last..boundary.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            last = boundary.end();
        }

        let tail = text[last..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }

        if sentences.is_empty() {
            // Whitespace-only input still yields the original string
            sentences.push(text.to_string());
        }

        sentences
    }
}

/// Re-split multi-sentence entries into one entry per sentence.
///
/// Single-sentence entries pass through unchanged. An entry splitting into
/// `k > 1` sentences is replaced by `k` entries that partition its time span
/// into equal shares. The result is a new track, re-indexed to a contiguous
/// 1-based sequence; the input track is not modified.
pub fn resplit_track<S: SplitSentences>(track: &SubtitleTrack, splitter: &S) -> SubtitleTrack {
    let mut entries = Vec::with_capacity(track.len());

    for entry in &track.entries {
        let joined = entry.text.replace('\n', " ");
        let sentences = splitter.split(&joined);

        if sentences.len() <= 1 {
            entries.push(entry.clone());
            continue;
        }

        let k = sentences.len();
        let duration_ms = entry.duration_ms();

        // Boundary i sits at start + i/k of the duration; boundary k lands on
        // the original end exactly, so the sentences partition the entry
        let boundary = |i: usize| -> u64 {
            entry.start_time_ms + ((i as f64 * duration_ms as f64) / k as f64).round() as u64
        };

        for (i, sentence) in sentences.into_iter().enumerate() {
            entries.push(SubtitleEntry::new(
                entry.seq_num,
                boundary(i),
                boundary(i + 1),
                sentence,
            ));
        }
    }

    let mut track = SubtitleTrack::from_entries(entries);
    track.renumber();
    track
}
