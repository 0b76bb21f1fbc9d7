use std::cmp::Ordering;

use crate::models::{ItemKind, ResolvedSegment, SpeakerSegment, Transcript};

/// Reconstructs the spoken text of each segment from word-level items
///
/// Word items are indexed by start time once, so each lookup is a binary
/// search rather than a scan over the whole item list.
pub struct SegmentTextResolver<'a> {
    transcript: &'a Transcript,
    /// (start_time, item index), sorted by time then index
    index: Vec<(f64, usize)>,
}

impl<'a> SegmentTextResolver<'a> {
    pub fn new(transcript: &'a Transcript) -> Self {
        let mut index: Vec<(f64, usize)> = transcript
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.kind == ItemKind::Word)
            .map(|(i, item)| (item.start_time.unwrap_or(0.0), i))
            .collect();

        index.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        Self { transcript, index }
    }

    /// Words starting within [start_time, end_time], joined by single spaces
    pub fn resolve(&self, segment: &SpeakerSegment) -> String {
        let lo = self
            .index
            .partition_point(|(t, _)| t.total_cmp(&segment.start_time) == Ordering::Less);
        let hi = self
            .index
            .partition_point(|(t, _)| t.total_cmp(&segment.end_time) != Ordering::Greater);

        if lo >= hi {
            return String::new();
        }

        let mut positions: Vec<usize> = self.index[lo..hi].iter().map(|&(_, i)| i).collect();
        // Restore transcript order in case item times are not monotonic
        positions.sort_unstable();

        positions
            .iter()
            .map(|&i| self.transcript.items[i].text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolve every segment once, in segment order
    pub fn resolve_all(&self) -> Vec<ResolvedSegment> {
        self.transcript
            .segments
            .iter()
            .map(|segment| ResolvedSegment {
                speaker: segment.speaker_label.clone(),
                start_time: segment.start_time,
                end_time: segment.end_time,
                text: self.resolve(segment),
            })
            .collect()
    }
}

/// Convenience wrapper for a one-off resolution pass
pub fn resolve_segments(transcript: &Transcript) -> Vec<ResolvedSegment> {
    SegmentTextResolver::new(transcript).resolve_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TranscriptItem;

    fn sample() -> Transcript {
        Transcript::new(
            vec![
                TranscriptItem::word("Hello", 0.5),
                TranscriptItem::word("doctor", 0.9),
                TranscriptItem::punctuation("."),
                TranscriptItem::word("Sit", 2.0),
                TranscriptItem::word("down", 2.4),
                TranscriptItem::punctuation(","),
                TranscriptItem::word("please", 3.0),
            ],
            vec![
                SpeakerSegment::new("spk_1", 0.5, 1.2),
                SpeakerSegment::new("spk_0", 2.0, 3.0),
                SpeakerSegment::new("spk_0", 5.0, 6.0),
            ],
        )
    }

    #[test]
    fn test_resolve_inclusive_bounds() {
        let transcript = sample();
        let resolver = SegmentTextResolver::new(&transcript);

        assert_eq!(resolver.resolve(&transcript.segments[0]), "Hello doctor");
        // Both boundary words (2.0 and 3.0) are included, punctuation is dropped
        assert_eq!(resolver.resolve(&transcript.segments[1]), "Sit down please");
    }

    #[test]
    fn test_resolve_empty_range() {
        let transcript = sample();
        let resolver = SegmentTextResolver::new(&transcript);

        assert_eq!(resolver.resolve(&transcript.segments[2]), "");
    }

    #[test]
    fn test_resolve_keeps_transcript_order() {
        let transcript = Transcript::new(
            vec![
                TranscriptItem::word("first", 1.2),
                TranscriptItem::word("second", 1.1),
                TranscriptItem::word("third", 1.3),
            ],
            vec![SpeakerSegment::new("spk_0", 1.0, 2.0)],
        );

        let resolved = resolve_segments(&transcript);
        assert_eq!(resolved[0].text, "first second third");
    }

    #[test]
    fn test_resolve_all_preserves_segment_order() {
        let transcript = sample();
        let resolved = resolve_segments(&transcript);

        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[1].speaker, "spk_0");
        assert_eq!(resolved[1].start_time, 2.0);
    }

    #[test]
    fn test_empty_transcript() {
        assert!(resolve_segments(&Transcript::default()).is_empty());
    }
}
