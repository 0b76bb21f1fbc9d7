use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::{SentimentResult, SentimentService};

/// Configuration for the HTTP sentiment client
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// Endpoint accepting `{"Text", "LanguageCode"}` (from SENTIMENT_ENDPOINT)
    pub endpoint: String,
    /// Optional key sent as `x-api-key` (from SENTIMENT_API_KEY)
    pub api_key: Option<String>,
    pub language_code: String,
    pub timeout: Duration,
}

impl SentimentConfig {
    /// Returns `None` when SENTIMENT_ENDPOINT is unset or blank
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("SENTIMENT_ENDPOINT").ok()?;
        if endpoint.trim().is_empty() {
            return None;
        }

        Some(Self {
            endpoint,
            api_key: std::env::var("SENTIMENT_API_KEY").ok(),
            language_code: "en".to_string(),
            timeout: Duration::from_secs(10),
        })
    }

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            language_code: "en".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for a Comprehend-style sentiment endpoint
pub struct HttpSentimentClient {
    client: Client,
    config: SentimentConfig,
}

impl HttpSentimentClient {
    pub fn new(config: SentimentConfig) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EngineError::Sentiment(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

impl SentimentService for HttpSentimentClient {
    async fn detect_sentiment(&self, text: &str) -> EngineResult<SentimentResult> {
        let request = SentimentRequest {
            text,
            language_code: &self.config.language_code,
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.header("x-api-key", key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EngineError::Sentiment(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Sentiment(format!("{status} - {body}")));
        }

        let result: SentimentResult = response
            .json()
            .await
            .map_err(|e| EngineError::Sentiment(format!("unreadable reply: {e}")))?;

        debug!(
            "Sentiment {:?} (negative {:.2})",
            result.sentiment, result.scores.negative
        );
        Ok(result)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SentimentRequest<'a> {
    text: &'a str,
    language_code: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = SentimentRequest {
            text: "hello",
            language_code: "en",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, serde_json::json!({"Text": "hello", "LanguageCode": "en"}));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let mut config = SentimentConfig::new("http://127.0.0.1:9/sentiment");
        config.timeout = Duration::from_millis(500);
        let client = HttpSentimentClient::new(config).unwrap();

        let result = client.detect_sentiment("text").await;
        assert!(matches!(result, Err(EngineError::Sentiment(_))));
    }
}
