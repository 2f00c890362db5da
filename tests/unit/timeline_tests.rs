/*!
 * Tests for interval allocation and timeline assembly
 */

use anyhow::Result;
use subsynth::errors::TimelineError;
use subsynth::text_chunker::TextChunk;
use subsynth::timeline::{allocate, TimeInterval, TimelineAssembler, Transcribe, Transcription};

/// Transcriber stub replaying scripted outcomes in order
struct StubTranscriber {
    // None simulates a recognizer failure for that interval
    outcomes: Vec<Option<String>>,
    next: usize,
}

impl StubTranscriber {
    fn new(outcomes: Vec<Option<&str>>) -> Self {
        StubTranscriber {
            outcomes: outcomes.into_iter().map(|o| o.map(|s| s.to_string())).collect(),
            next: 0,
        }
    }
}

impl Transcribe for StubTranscriber {
    fn transcribe(&mut self, _interval: &TimeInterval) -> Result<Transcription> {
        let outcome = self.outcomes.get(self.next).cloned().flatten();
        self.next += 1;

        match outcome {
            Some(text) => Ok(Transcription::Text(text)),
            None => Err(anyhow::anyhow!("recognizer unavailable")),
        }
    }
}

fn chunk_with_words(words: &str) -> TextChunk {
    TextChunk { lines: vec![words.to_string()] }
}

/// Test interval validation rejects inverted and negative ranges
#[test]
fn test_time_interval_withInvalidBounds_shouldFail() {
    assert!(matches!(
        TimeInterval::new(5.0, 5.0),
        Err(TimelineError::MalformedInterval { .. })
    ));
    assert!(TimeInterval::new(8.0, 3.0).is_err());
    assert!(TimeInterval::new(-1.0, 3.0).is_err());
    assert!(TimeInterval::new(0.0, 3.0).is_ok());
}

/// Test the tiling property: allocated sub-intervals exactly tile the parent
#[test]
fn test_allocate_withSeveralChunks_shouldTileIntervalExactly() {
    let interval = TimeInterval::new(2.0, 11.0).unwrap();
    let chunks = vec![
        chunk_with_words("one two three"),
        chunk_with_words("four"),
        chunk_with_words("five six"),
    ];

    let allocated = allocate(&interval, &chunks).unwrap();

    assert_eq!(allocated.len(), 3);
    assert!((allocated[0].start - 2.0).abs() < 1e-9);

    // Consecutive sub-intervals meet with no gap or overlap
    for pair in allocated.windows(2) {
        assert!((pair[0].end - pair[1].start).abs() < 1e-9);
    }

    // The final end lands on the interval end exactly
    assert!((allocated[2].end - 11.0).abs() < 1e-9);
}

/// Test weight proportionality: durations scale with word counts
#[test]
fn test_allocate_withUnequalWeights_shouldSplitProportionally() {
    let interval = TimeInterval::new(0.0, 9.0).unwrap();
    let chunks = vec![
        chunk_with_words("single"),
        chunk_with_words("three words here"),
    ];

    let allocated = allocate(&interval, &chunks).unwrap();

    let d0 = allocated[0].end - allocated[0].start;
    let d1 = allocated[1].end - allocated[1].start;

    assert!((d0 - 2.25).abs() < 1e-9);
    assert!((d1 - 6.75).abs() < 1e-9);
    assert!((d0 / d1 - 1.0 / 3.0).abs() < 1e-9);
}

/// Test allocation refuses a chunk set with no words
#[test]
fn test_allocate_withZeroTotalWeight_shouldFail() {
    let interval = TimeInterval::new(0.0, 5.0).unwrap();
    let chunks = vec![TextChunk { lines: vec![String::new()] }];

    assert!(matches!(
        allocate(&interval, &chunks),
        Err(TimelineError::ZeroWeightChunks)
    ));
}

/// Test the concrete reference scenario from a single interval
#[test]
fn test_assemble_withSingleInterval_shouldEmitSingleEntry() {
    let intervals = vec![TimeInterval::new(10.0, 14.0).unwrap()];
    let mut transcriber = StubTranscriber::new(vec![Some("Hello world. How are you today.")]);

    let assembler = TimelineAssembler::new(40, 2);
    let track = assembler.assemble(&intervals, &mut transcriber).unwrap();

    assert_eq!(track.len(), 1);
    assert_eq!(track.entries[0].seq_num, 1);
    assert_eq!(track.entries[0].start_time_ms, 10_000);
    assert_eq!(track.entries[0].end_time_ms, 14_000);
    assert_eq!(track.entries[0].text, "Hello world. How are you today.");
}

/// Test the gap-closing rule stretches entries to the next entry's start
#[test]
fn test_assemble_withSilenceBetweenIntervals_shouldCloseGaps() {
    let intervals = vec![
        TimeInterval::new(0.0, 2.0).unwrap(),
        TimeInterval::new(3.5, 5.0).unwrap(),
    ];
    let mut transcriber = StubTranscriber::new(vec![Some("first utterance"), Some("second utterance")]);

    let assembler = TimelineAssembler::new(40, 2);
    let track = assembler.assemble(&intervals, &mut transcriber).unwrap();

    assert_eq!(track.len(), 2);

    // The first entry's allocator-computed end (2.0s) is discarded in favor of
    // the next entry's start; the final entry keeps its own end
    assert_eq!(track.entries[0].start_time_ms, 0);
    assert_eq!(track.entries[0].end_time_ms, 3_500);
    assert_eq!(track.entries[1].start_time_ms, 3_500);
    assert_eq!(track.entries[1].end_time_ms, 5_000);

    assert!(track.validate_timeline().is_ok());
}

/// Test the monotonic non-overlap property over a multi-chunk interval
#[test]
fn test_assemble_withMultipleChunks_shouldProduceZeroGapTimeline() {
    let intervals = vec![TimeInterval::new(0.0, 12.0).unwrap()];
    let mut transcriber = StubTranscriber::new(vec![Some(
        "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu",
    )]);

    // Narrow display forces several chunks out of one interval
    let assembler = TimelineAssembler::new(12, 1);
    let track = assembler.assemble(&intervals, &mut transcriber).unwrap();

    assert!(track.len() > 1);
    for pair in track.entries.windows(2) {
        assert_eq!(pair[0].end_time_ms, pair[1].start_time_ms);
    }

    assert_eq!(track.entries.last().unwrap().end_time_ms, 12_000);
}

/// Test the skip-empty law: empty transcriptions contribute no entries
#[test]
fn test_assemble_withEmptyTranscription_shouldSkipInterval() {
    let intervals = vec![
        TimeInterval::new(0.0, 2.0).unwrap(),
        TimeInterval::new(2.0, 4.0).unwrap(),
        TimeInterval::new(4.0, 6.0).unwrap(),
    ];
    let mut transcriber = StubTranscriber::new(vec![Some("speech here"), Some(""), Some("more speech")]);

    let assembler = TimelineAssembler::new(40, 2);
    let track = assembler.assemble(&intervals, &mut transcriber).unwrap();

    assert_eq!(track.len(), 2);
    assert_eq!(track.entries[0].text, "speech here");
    assert_eq!(track.entries[1].text, "more speech");

    // Sequence numbers stay contiguous despite the skipped interval
    assert_eq!(track.entries[0].seq_num, 1);
    assert_eq!(track.entries[1].seq_num, 2);
}

/// Test an explicit no-speech result contributes no entries
#[test]
fn test_assemble_withNoSpeechResult_shouldSkipInterval() {
    struct NoSpeechTranscriber;
    impl Transcribe for NoSpeechTranscriber {
        fn transcribe(&mut self, _interval: &TimeInterval) -> Result<Transcription> {
            Ok(Transcription::NoSpeech)
        }
    }

    let intervals = vec![TimeInterval::new(0.0, 2.0).unwrap()];
    let assembler = TimelineAssembler::new(40, 2);
    let track = assembler.assemble(&intervals, &mut NoSpeechTranscriber).unwrap();

    assert!(track.is_empty());
}

/// Test a failing recognizer call skips only the affected interval
#[test]
fn test_assemble_withTranscriberError_shouldSkipAndContinue() {
    let intervals = vec![
        TimeInterval::new(0.0, 1.0).unwrap(),
        TimeInterval::new(1.0, 2.0).unwrap(),
    ];
    let mut transcriber = StubTranscriber::new(vec![None, Some("kept")]);

    let assembler = TimelineAssembler::new(40, 2);
    let track = assembler.assemble(&intervals, &mut transcriber).unwrap();

    assert_eq!(track.len(), 1);
    assert_eq!(track.entries[0].text, "kept");
}

/// Test whitespace-only text carries no word weight and emits nothing
#[test]
fn test_assemble_withWhitespaceOnlyText_shouldEmitNothing() {
    let intervals = vec![TimeInterval::new(0.0, 2.0).unwrap()];
    let mut transcriber = StubTranscriber::new(vec![Some("   \t ")]);

    let assembler = TimelineAssembler::new(40, 2);
    let track = assembler.assemble(&intervals, &mut transcriber).unwrap();

    assert!(track.is_empty());
}
