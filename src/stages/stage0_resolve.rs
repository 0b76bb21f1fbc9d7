use tracing::info;

use crate::analysis::SegmentTextResolver;
use crate::models::{ResolvedSegment, Transcript};

/// Result of Stage 0 resolution
#[derive(Debug)]
pub struct ResolutionResult {
    /// One entry per speaker segment, in transcript order
    pub segments: Vec<ResolvedSegment>,
    /// Segments whose time range contains no spoken words
    pub empty_segments: usize,
}

impl ResolutionResult {
    /// All resolved text joined in segment order
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Perform Stage 0: resolve the text of every segment exactly once
///
/// Both analyzers consume the result, so no segment is resolved twice.
pub fn resolve(transcript: &Transcript) -> ResolutionResult {
    let segments = SegmentTextResolver::new(transcript).resolve_all();
    let empty_segments = segments.iter().filter(|s| s.text.is_empty()).count();

    info!(
        "Resolved {} segments from {} items ({} without words)",
        segments.len(),
        transcript.items.len(),
        empty_segments
    );

    ResolutionResult {
        segments,
        empty_segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SpeakerSegment, TranscriptItem};

    #[test]
    fn test_resolve_counts_empty_segments() {
        let transcript = Transcript::new(
            vec![
                TranscriptItem::word("hello", 0.1),
                TranscriptItem::word("there", 2.1),
            ],
            vec![
                SpeakerSegment::new("spk_0", 0.0, 0.5),
                SpeakerSegment::new("spk_1", 1.0, 1.5),
                SpeakerSegment::new("spk_0", 2.0, 2.5),
            ],
        );

        let result = resolve(&transcript);

        assert_eq!(result.segments.len(), 3);
        assert_eq!(result.empty_segments, 1);
        assert_eq!(result.full_text(), "hello there");
    }
}
