use serde::{Deserialize, Serialize};

use super::{TranscribeDocument, TranscribeItem, TranscribeSegment};

/// Kind of recognized token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A spoken word
    Word,
    /// Punctuation or any other non-spoken token
    Punctuation,
}

/// One recognized token, in transcript order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptItem {
    pub kind: ItemKind,
    /// Start time in seconds, only present for spoken words
    pub start_time: Option<f64>,
    /// Best transcription alternative
    pub text: String,
}

impl TranscriptItem {
    pub fn word(text: impl Into<String>, start_time: f64) -> Self {
        Self {
            kind: ItemKind::Word,
            start_time: Some(start_time),
            text: text.into(),
        }
    }

    pub fn punctuation(text: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Punctuation,
            start_time: None,
            text: text.into(),
        }
    }

    fn from_transcribe(item: &TranscribeItem) -> Self {
        if item.is_pronunciation() {
            Self {
                kind: ItemKind::Word,
                start_time: Some(item.start_time.unwrap_or(0.0)),
                text: item.content().to_string(),
            }
        } else {
            Self {
                kind: ItemKind::Punctuation,
                start_time: item.start_time,
                text: item.content().to_string(),
            }
        }
    }
}

/// A contiguous utterance attributed to one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSegment {
    /// Opaque diarization label (e.g. "spk_0")
    pub speaker_label: String,
    /// Start time in seconds
    pub start_time: f64,
    /// End time in seconds, never before `start_time`
    pub end_time: f64,
}

impl SpeakerSegment {
    pub fn new(speaker_label: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            speaker_label: speaker_label.into(),
            start_time,
            end_time: end_time.max(start_time),
        }
    }

    fn from_transcribe(segment: &TranscribeSegment) -> Self {
        Self::new(
            segment.speaker_label.as_deref().unwrap_or("unknown"),
            segment.start_time.unwrap_or(0.0),
            segment.end_time.unwrap_or(0.0),
        )
    }
}

/// Normalized diarized transcript
///
/// Segment order is the order of occurrence in the source document and is
/// never re-sorted: consecutive-speaker analysis depends on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub items: Vec<TranscriptItem>,
    pub segments: Vec<SpeakerSegment>,
}

impl Transcript {
    pub fn new(items: Vec<TranscriptItem>, segments: Vec<SpeakerSegment>) -> Self {
        Self { items, segments }
    }

    pub fn from_transcribe(document: &TranscribeDocument) -> Self {
        let items = document
            .results
            .items
            .iter()
            .map(TranscriptItem::from_transcribe)
            .collect();
        let segments = document
            .results
            .speaker_labels
            .segments
            .iter()
            .map(SpeakerSegment::from_transcribe)
            .collect();

        Self { items, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.segments.is_empty()
    }

    /// Distinct speaker labels in order of first appearance
    pub fn speakers(&self) -> Vec<&str> {
        let mut speakers: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if !speakers.contains(&segment.speaker_label.as_str()) {
                speakers.push(&segment.speaker_label);
            }
        }
        speakers
    }

    /// Span covered by the segments, in seconds
    pub fn duration(&self) -> f64 {
        let start = self
            .segments
            .iter()
            .map(|s| s.start_time)
            .fold(f64::INFINITY, f64::min);
        let end = self
            .segments
            .iter()
            .map(|s| s.end_time)
            .fold(f64::NEG_INFINITY, f64::max);

        if start.is_finite() && end.is_finite() {
            end - start
        } else {
            0.0
        }
    }
}

/// A segment paired with the text spoken during it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSegment {
    pub speaker: String,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transcribe_defaults() {
        let json = r#"{
            "results": {
                "items": [
                    {"type": "pronunciation", "alternatives": [{"content": "hi"}]},
                    {"type": "punctuation", "alternatives": [{"content": "."}]}
                ],
                "speaker_labels": {
                    "segments": [
                        {"start_time": "2.0", "end_time": "1.0"}
                    ]
                }
            }
        }"#;

        let doc: TranscribeDocument = serde_json::from_str(json).unwrap();
        let transcript = Transcript::from_transcribe(&doc);

        assert_eq!(transcript.items[0], TranscriptItem::word("hi", 0.0));
        assert_eq!(transcript.items[1].kind, ItemKind::Punctuation);
        assert_eq!(transcript.segments[0].speaker_label, "unknown");
        assert_eq!(transcript.segments[0].end_time, 2.0);
    }

    #[test]
    fn test_speakers_and_duration() {
        let transcript = Transcript::new(
            vec![],
            vec![
                SpeakerSegment::new("spk_0", 1.0, 3.0),
                SpeakerSegment::new("spk_1", 3.5, 4.0),
                SpeakerSegment::new("spk_0", 4.5, 9.0),
            ],
        );

        assert_eq!(transcript.speakers(), vec!["spk_0", "spk_1"]);
        assert_eq!(transcript.duration(), 8.0);
        assert_eq!(Transcript::default().duration(), 0.0);
    }
}
