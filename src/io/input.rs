use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{TranscribeDocument, Transcript};

/// Parse a transcription JSON file into a Transcript
pub fn parse_transcribe_file(path: &Path) -> Result<Transcript> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcribe_json(&content)
}

/// Parse transcription JSON into a Transcript
///
/// Missing, null or mistyped fields are defaulted; only a document that is
/// not JSON at all is an error.
pub fn parse_transcribe_json(json: &str) -> Result<Transcript> {
    let document: TranscribeDocument =
        serde_json::from_str(json).context("Failed to parse transcript JSON")?;
    Ok(Transcript::from_transcribe(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemKind;

    #[test]
    fn test_parse_transcribe_json() {
        let json = r#"{
            "results": {
                "items": [
                    {"type": "pronunciation", "start_time": "0.5", "end_time": "0.8", "alternatives": [{"content": "Lie"}]},
                    {"type": "pronunciation", "start_time": "0.9", "end_time": "1.1", "alternatives": [{"content": "back"}]},
                    {"type": "punctuation", "alternatives": [{"content": "."}]},
                    {"type": "pronunciation", "start_time": "1.6", "end_time": "1.9", "alternatives": [{"content": "Okay"}]}
                ],
                "speaker_labels": {
                    "speakers": 2,
                    "segments": [
                        {"speaker_label": "spk_0", "start_time": "0.5", "end_time": "1.1", "items": []},
                        {"speaker_label": "spk_1", "start_time": "1.6", "end_time": "1.9"}
                    ]
                }
            }
        }"#;

        let transcript = parse_transcribe_json(json).unwrap();

        assert_eq!(transcript.items.len(), 4);
        assert_eq!(transcript.items[2].kind, ItemKind::Punctuation);
        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[1].speaker_label, "spk_1");
        assert_eq!(transcript.segments[1].start_time, 1.6);
    }

    #[test]
    fn test_mistyped_fields_do_not_reject_document() {
        let json = r#"{
            "results": {
                "items": [
                    {"type": "pronunciation", "start_time": "0.5", "alternatives": null},
                    {"type": "pronunciation", "start_time": "0.9", "alternatives": [{"content": "stand"}]}
                ],
                "speaker_labels": {
                    "segments": [
                        {"speaker_label": 0, "start_time": "0.5", "end_time": "1.0"},
                        {"speaker_label": null, "start_time": "2.0", "end_time": "3.0"}
                    ]
                }
            }
        }"#;

        let transcript = parse_transcribe_json(json).unwrap();

        assert_eq!(transcript.items.len(), 2);
        assert_eq!(transcript.items[0].text, "");
        assert_eq!(transcript.segments[0].speaker_label, "0");
        assert_eq!(transcript.segments[1].speaker_label, "unknown");
    }

    #[test]
    fn test_empty_document() {
        let transcript = parse_transcribe_json(r#"{"results": {}}"#).unwrap();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_transcribe_json("not json").is_err());
    }
}
