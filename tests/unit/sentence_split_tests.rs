/*!
 * Tests for sentence-level re-segmentation
 */

use subsynth::sentence_split::{resplit_track, RuleSentenceSplitter, SplitSentences};
use subsynth::subtitle_track::{SubtitleEntry, SubtitleTrack};

/// Test the rule splitter finds terminal punctuation boundaries
#[test]
fn test_rule_splitter_withTwoSentences_shouldSplitAtBoundary() {
    let splitter = RuleSentenceSplitter;
    let sentences = splitter.split("Hello world. How are you today.");

    assert_eq!(sentences, vec!["Hello world.", "How are you today."]);
}

/// Test un-punctuated text passes through as a single sentence
#[test]
fn test_rule_splitter_withNoPunctuation_shouldReturnWholeText() {
    let splitter = RuleSentenceSplitter;
    let sentences = splitter.split("so I was thinking maybe we could go");

    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0], "so I was thinking maybe we could go");
}

/// Test a closing quote after the terminator stays with its sentence
#[test]
fn test_rule_splitter_withQuotedSentence_shouldKeepQuote() {
    let splitter = RuleSentenceSplitter;
    let sentences = splitter.split(r#"She said "stop." Then she left."#);

    assert_eq!(sentences, vec![r#"She said "stop.""#, "Then she left."]);
}

/// Test the concrete reference scenario: one entry split into two sentences
#[test]
fn test_resplit_track_withTwoSentenceEntry_shouldDivideDurationEqually() {
    let track = SubtitleTrack::from_entries(vec![SubtitleEntry::new(
        1,
        10_000,
        14_000,
        "Hello world. How are you today.".to_string(),
    )]);

    let result = resplit_track(&track, &RuleSentenceSplitter);

    assert_eq!(result.len(), 2);

    assert_eq!(result.entries[0].seq_num, 1);
    assert_eq!(result.entries[0].start_time_ms, 10_000);
    assert_eq!(result.entries[0].end_time_ms, 12_000);
    assert_eq!(result.entries[0].text, "Hello world.");

    assert_eq!(result.entries[1].seq_num, 2);
    assert_eq!(result.entries[1].start_time_ms, 12_000);
    assert_eq!(result.entries[1].end_time_ms, 14_000);
    assert_eq!(result.entries[1].text, "How are you today.");
}

/// Test sentence pieces partition the original entry exactly
#[test]
fn test_resplit_track_withThreeSentences_shouldPartitionExactly() {
    let track = SubtitleTrack::from_entries(vec![SubtitleEntry::new(
        1,
        0,
        6_000,
        "One. Two. Three.".to_string(),
    )]);

    let result = resplit_track(&track, &RuleSentenceSplitter);

    assert_eq!(result.len(), 3);
    assert_eq!(result.entries[0].start_time_ms, 0);
    assert_eq!(result.entries[2].end_time_ms, 6_000);

    for pair in result.entries.windows(2) {
        assert_eq!(pair[0].end_time_ms, pair[1].start_time_ms);
    }

    for entry in &result.entries {
        assert_eq!(entry.duration_ms(), 2_000);
    }
}

/// Test single-sentence entries pass through unchanged
#[test]
fn test_resplit_track_withSingleSentenceEntries_shouldPassThrough() {
    let track = SubtitleTrack::from_entries(vec![
        SubtitleEntry::new(1, 0, 2_000, "First one.".to_string()),
        SubtitleEntry::new(2, 2_000, 4_000, "Second one.".to_string()),
    ]);

    let result = resplit_track(&track, &RuleSentenceSplitter);

    assert_eq!(result, track);
}

/// Test multi-line entry text is joined before sentence detection
#[test]
fn test_resplit_track_withMultiLineEntry_shouldSplitAcrossLineBreak() {
    let track = SubtitleTrack::from_entries(vec![SubtitleEntry::new(
        1,
        0,
        4_000,
        "A short sentence ends here.\nAnd another begins.".to_string(),
    )]);

    let result = resplit_track(&track, &RuleSentenceSplitter);

    assert_eq!(result.len(), 2);
    assert_eq!(result.entries[0].text, "A short sentence ends here.");
    assert_eq!(result.entries[1].text, "And another begins.");
}

/// Test the output is re-indexed contiguously across mixed entries
#[test]
fn test_resplit_track_withMixedEntries_shouldReindexContiguously() {
    let track = SubtitleTrack::from_entries(vec![
        SubtitleEntry::new(1, 0, 2_000, "Stays whole".to_string()),
        SubtitleEntry::new(2, 2_000, 6_000, "Splits here. Into two.".to_string()),
        SubtitleEntry::new(3, 6_000, 8_000, "Also whole".to_string()),
    ]);

    let result = resplit_track(&track, &RuleSentenceSplitter);

    assert_eq!(result.len(), 4);
    let seq_nums: Vec<usize> = result.entries.iter().map(|e| e.seq_num).collect();
    assert_eq!(seq_nums, vec![1, 2, 3, 4]);

    assert!(result.validate_timeline().is_ok());
}

/// Test a splitter that never splits leaves the track untouched
#[test]
fn test_resplit_track_withIdentitySplitter_shouldChangeNothing() {
    struct IdentitySplitter;
    impl SplitSentences for IdentitySplitter {
        fn split(&self, text: &str) -> Vec<String> {
            vec![text.to_string()]
        }
    }

    let track = SubtitleTrack::from_entries(vec![SubtitleEntry::new(
        1,
        0,
        5_000,
        "Several. Sentences. Ignored.".to_string(),
    )]);

    let result = resplit_track(&track, &IdentitySplitter);

    assert_eq!(result, track);
}
