use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Root document produced by the transcription service
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TranscribeDocument {
    #[serde(default, deserialize_with = "lenient_object")]
    pub results: TranscribeResults,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TranscribeResults {
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Vec<TranscribeItem>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub speaker_labels: SpeakerLabels,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpeakerLabels {
    #[serde(default, deserialize_with = "lenient_list")]
    pub segments: Vec<TranscribeSegment>,
}

/// A single recognized token
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TranscribeItem {
    /// "pronunciation" for spoken words, "punctuation" otherwise
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub item_type: Option<String>,
    /// Start timestamp in seconds, absent for punctuation
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub start_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub end_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub alternatives: Vec<TranscribeAlternative>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TranscribeAlternative {
    #[serde(default, deserialize_with = "lenient_content")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub confidence: Option<String>,
}

/// A speaker-attributed time span
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TranscribeSegment {
    /// Numeric labels are kept as their decimal text
    #[serde(default, deserialize_with = "lenient_text")]
    pub speaker_label: Option<String>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub start_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub end_time: Option<f64>,
}

impl TranscribeItem {
    pub fn is_pronunciation(&self) -> bool {
        self.item_type.as_deref() == Some("pronunciation")
    }

    /// Best alternative's text, empty if there is none
    pub fn content(&self) -> &str {
        self.alternatives
            .first()
            .map(|a| a.content.as_str())
            .unwrap_or("")
    }
}

/// Accept timestamps as JSON strings or numbers. Anything else reads as 0.0.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }))
}

/// Strings pass through and numbers become their decimal text. Anything else is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_content<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Non-arrays read as empty; elements of the wrong shape are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Anything that does not read as `T` falls back to `T::default()`.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcribe_document() {
        let json = r#"{
            "results": {
                "items": [
                    {"type": "pronunciation", "start_time": "0.5", "end_time": "0.8", "alternatives": [{"content": "Hello", "confidence": "0.99"}]},
                    {"type": "punctuation", "alternatives": [{"content": ","}]},
                    {"type": "pronunciation", "start_time": 0.9, "end_time": 1.2, "alternatives": [{"content": "there"}]}
                ],
                "speaker_labels": {
                    "segments": [
                        {"speaker_label": "spk_0", "start_time": "0.5", "end_time": "1.2"}
                    ]
                }
            }
        }"#;

        let doc: TranscribeDocument = serde_json::from_str(json).unwrap();
        let items = &doc.results.items;

        assert_eq!(items.len(), 3);
        assert!(items[0].is_pronunciation());
        assert_eq!(items[0].start_time, Some(0.5));
        assert_eq!(items[0].content(), "Hello");
        assert!(!items[1].is_pronunciation());
        assert_eq!(items[1].start_time, None);
        assert_eq!(items[2].start_time, Some(0.9));
        assert_eq!(doc.results.speaker_labels.segments[0].end_time, Some(1.2));
    }

    #[test]
    fn test_malformed_fields_default() {
        let json = r#"{
            "results": {
                "items": [
                    {"type": "pronunciation", "start_time": "abc", "alternatives": []}
                ],
                "speaker_labels": {
                    "segments": [{"start_time": null}]
                }
            }
        }"#;

        let doc: TranscribeDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.results.items[0].start_time, Some(0.0));
        assert_eq!(doc.results.items[0].content(), "");
        assert_eq!(doc.results.speaker_labels.segments[0].speaker_label, None);
        assert_eq!(doc.results.speaker_labels.segments[0].start_time, None);
    }

    #[test]
    fn test_null_and_mistyped_fields_default() {
        let json = r#"{
            "results": {
                "items": [
                    {"type": "pronunciation", "start_time": "1.0", "alternatives": null},
                    {"type": 7, "alternatives": [{"content": null, "confidence": 0.98}]},
                    {"type": "pronunciation", "start_time": "2.0", "alternatives": [null, {"content": 42}]},
                    null
                ],
                "speaker_labels": {
                    "segments": [
                        {"speaker_label": 0, "start_time": "1.0", "end_time": "2.5"},
                        {"speaker_label": ["spk_1"], "start_time": "3.0", "end_time": "4.0"},
                        "garbage"
                    ]
                }
            }
        }"#;

        let doc: TranscribeDocument = serde_json::from_str(json).unwrap();
        let items = &doc.results.items;
        let segments = &doc.results.speaker_labels.segments;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].content(), "");
        assert_eq!(items[1].item_type.as_deref(), Some("7"));
        assert!(!items[1].is_pronunciation());
        assert_eq!(items[1].content(), "");
        assert_eq!(items[1].alternatives[0].confidence.as_deref(), Some("0.98"));
        assert_eq!(items[2].content(), "42");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].speaker_label.as_deref(), Some("0"));
        assert_eq!(segments[1].speaker_label, None);
    }

    #[test]
    fn test_null_containers_default() {
        let doc: TranscribeDocument =
            serde_json::from_str(r#"{"results": {"items": null, "speaker_labels": null}}"#).unwrap();
        assert!(doc.results.items.is_empty());
        assert!(doc.results.speaker_labels.segments.is_empty());

        let doc: TranscribeDocument = serde_json::from_str(r#"{"results": "pending"}"#).unwrap();
        assert!(doc.results.items.is_empty());
    }

    #[test]
    fn test_missing_results() {
        let doc: TranscribeDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.results.items.is_empty());
        assert!(doc.results.speaker_labels.segments.is_empty());
    }
}
