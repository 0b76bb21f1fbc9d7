use std::fmt;

use serde::{Deserialize, Serialize};

/// A taxonomy entry recognized in one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDetection {
    /// Taxonomy label (e.g. "straight_leg_raise")
    pub label: String,
    /// Segment start time in seconds
    pub timestamp: f64,
    /// Match strength in [0, 1]
    pub confidence: f64,
    /// Leading excerpt of the segment text, original casing
    pub matched_text: String,
    pub speaker: String,
    /// Full resolved text of the segment
    pub transcript_text: String,
}

/// Kind of conduct concern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagType {
    Interruption,
    NegativeTone,
    Dismissive,
    Aggressive,
    NegativeSentiment,
}

impl FlagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagType::Interruption => "interruption",
            FlagType::NegativeTone => "negative_tone",
            FlagType::Dismissive => "dismissive",
            FlagType::Aggressive => "aggressive",
            FlagType::NegativeSentiment => "negative_sentiment",
        }
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        })
    }
}

/// Per-category confidence reported by the sentiment service
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentScores {
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub negative: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub mixed: f64,
}

/// A conduct concern attributed to the examiner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemeanorFlag {
    pub flag_type: FlagType,
    /// Start time in seconds of the segment that raised the flag
    pub timestamp: f64,
    pub transcript_excerpt: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_scores: Option<SentimentScores>,
}

/// A test declaration suggested by the LLM fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTestDeclaration {
    pub test_type: String,
    #[serde(default)]
    pub declaration: String,
    /// Coarse position in the conversation ("early", "middle", "late")
    #[serde(default)]
    pub approximate_time: String,
}

/// First `max_chars` characters of `text`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
