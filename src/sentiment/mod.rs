pub mod client;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::SentimentScores;

pub use client::*;

/// Overall sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

/// Reply of the sentiment classification service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    #[serde(rename = "Sentiment")]
    pub sentiment: SentimentLabel,
    #[serde(rename = "SentimentScore", default)]
    pub scores: SentimentScores,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            sentiment: SentimentLabel::Neutral,
            scores: SentimentScores {
                neutral: 1.0,
                ..Default::default()
            },
        }
    }
}

/// External sentiment classifier
pub trait SentimentService {
    /// Classify `text`. Callers bound the call with their own timeout.
    fn detect_sentiment(&self, text: &str)
    -> impl Future<Output = EngineResult<SentimentResult>> + Send;
}

/// Used when no sentiment endpoint is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSentiment;

impl SentimentService for NoSentiment {
    async fn detect_sentiment(&self, _text: &str) -> EngineResult<SentimentResult> {
        Ok(SentimentResult::neutral())
    }
}

/// Either a live HTTP client or the neutral stand-in
pub enum SentimentBackend {
    Http(HttpSentimentClient),
    Disabled(NoSentiment),
}

impl SentimentBackend {
    /// HTTP client when `SENTIMENT_ENDPOINT` is set, neutral otherwise
    pub fn from_env() -> EngineResult<Self> {
        match SentimentConfig::from_env() {
            Some(config) => Ok(Self::Http(HttpSentimentClient::new(config)?)),
            None => Ok(Self::Disabled(NoSentiment)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl SentimentService for SentimentBackend {
    async fn detect_sentiment(&self, text: &str) -> EngineResult<SentimentResult> {
        match self {
            Self::Http(client) => client.detect_sentiment(text).await,
            Self::Disabled(none) => none.detect_sentiment(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comprehend_reply() {
        let json = r#"{
            "Sentiment": "NEGATIVE",
            "SentimentScore": {"Positive": 0.02, "Negative": 0.91, "Neutral": 0.05, "Mixed": 0.02}
        }"#;

        let result: SentimentResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.sentiment, SentimentLabel::Negative);
        assert_eq!(result.scores.negative, 0.91);
    }

    #[tokio::test]
    async fn test_no_sentiment_is_neutral() {
        let result = NoSentiment.detect_sentiment("anything").await.unwrap();
        assert_eq!(result.sentiment, SentimentLabel::Neutral);
        assert_eq!(result.scores.negative, 0.0);
    }
}
