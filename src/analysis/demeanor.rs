use std::time::Duration;

use tracing::{debug, info, warn};

use crate::models::{DemeanorFlag, FlagType, ResolvedSegment, Severity, Transcript, excerpt};
use crate::sentiment::{SentimentLabel, SentimentService};

use super::resolver::resolve_segments;
use super::tone::{ToneLexicon, ToneMatch};

/// Thresholds and limits for demeanor analysis
#[derive(Debug, Clone)]
pub struct DemeanorConfig {
    /// Consecutive-run counter value at which interruptions are flagged
    /// (2 means the third examiner utterance in a row)
    pub interruption_run_threshold: u32,
    /// Length of `transcript_excerpt` in characters
    pub excerpt_chars: usize,
    /// Number of leading examiner segments sent for sentiment
    pub sentiment_sample_segments: usize,
    /// Input size limit of the sentiment service, in bytes
    pub sentiment_max_bytes: usize,
    /// Negative score must be strictly above this to flag
    pub negative_sentiment_threshold: f64,
    pub sentiment_timeout: Duration,
}

impl Default for DemeanorConfig {
    fn default() -> Self {
        Self {
            interruption_run_threshold: 2,
            excerpt_chars: 200,
            sentiment_sample_segments: 10,
            sentiment_max_bytes: 5000,
            negative_sentiment_threshold: 0.6,
            sentiment_timeout: Duration::from_secs(10),
        }
    }
}

/// Tracks runs of consecutive examiner utterances
///
/// Any turn by another speaker ends a run; the next examiner turn after it
/// starts again from zero.
#[derive(Debug, Clone, Default)]
pub struct InterruptionTracker {
    consecutive_count: u32,
    last_was_examiner: bool,
}

impl InterruptionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next segment; returns the run counter after this segment
    pub fn observe(&mut self, is_examiner: bool) -> u32 {
        if is_examiner && self.last_was_examiner {
            self.consecutive_count += 1;
        } else {
            self.consecutive_count = 0;
        }
        self.last_was_examiner = is_examiner;
        self.consecutive_count
    }
}

/// Flags examiner conduct concerns across a transcript
pub struct DemeanorAnalyzer<'a> {
    lexicon: &'a ToneLexicon,
    config: DemeanorConfig,
}

impl<'a> DemeanorAnalyzer<'a> {
    pub fn new(lexicon: &'a ToneLexicon, config: DemeanorConfig) -> Self {
        Self { lexicon, config }
    }

    /// Lexical tone flags for one examiner utterance
    pub fn analyze_tone(&self, text: &str, timestamp: f64) -> Vec<DemeanorFlag> {
        let text_lower = text.to_lowercase();
        let transcript_excerpt = excerpt(text, self.config.excerpt_chars);

        self.lexicon
            .scan(&text_lower)
            .into_iter()
            .map(|m| {
                let (flag_type, severity, description) = match m {
                    ToneMatch::Negative(phrase) => (
                        FlagType::NegativeTone,
                        Severity::High,
                        format!("Negative language detected: \"{}\"", phrase),
                    ),
                    ToneMatch::Dismissive => (
                        FlagType::Dismissive,
                        Severity::Medium,
                        "Dismissive language detected".to_string(),
                    ),
                    ToneMatch::Aggressive => (
                        FlagType::Aggressive,
                        Severity::High,
                        "Aggressive or controlling language detected".to_string(),
                    ),
                };

                DemeanorFlag {
                    flag_type,
                    timestamp,
                    transcript_excerpt: transcript_excerpt.clone(),
                    severity,
                    description,
                    sentiment_scores: None,
                }
            })
            .collect()
    }

    /// Interruption and tone flags, in segment order
    pub fn analyze_lexical(&self, segments: &[ResolvedSegment], examiner: &str) -> Vec<DemeanorFlag> {
        let mut flags = Vec::new();
        let mut tracker = InterruptionTracker::new();

        for segment in segments {
            let is_examiner = segment.speaker == examiner;
            let run = tracker.observe(is_examiner);

            if !is_examiner {
                continue;
            }

            if run >= self.config.interruption_run_threshold {
                debug!("Interruption run of {} at {:.2}s", run + 1, segment.start_time);
                flags.push(DemeanorFlag {
                    flag_type: FlagType::Interruption,
                    timestamp: segment.start_time,
                    transcript_excerpt: excerpt(&segment.text, self.config.excerpt_chars),
                    severity: Severity::Medium,
                    description: format!("Examiner spoke {} times consecutively", run + 1),
                    sentiment_scores: None,
                });
            }

            flags.extend(self.analyze_tone(&segment.text, segment.start_time));
        }

        flags
    }

    /// Text sent to the sentiment service: leading examiner segments,
    /// space-joined and cut to the service's byte limit
    pub fn sentiment_sample<'s>(
        &self,
        segments: &'s [ResolvedSegment],
        examiner: &str,
    ) -> Option<(String, &'s ResolvedSegment)> {
        let examiner_segments: Vec<&ResolvedSegment> = segments
            .iter()
            .filter(|s| s.speaker == examiner)
            .take(self.config.sentiment_sample_segments)
            .collect();

        let first = *examiner_segments.first()?;
        let joined = examiner_segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let sample = truncate_to_bytes(&joined, self.config.sentiment_max_bytes);
        if sample.trim().is_empty() {
            return None;
        }

        Some((sample.to_string(), first))
    }

    /// Ask the sentiment service about the examiner sample
    ///
    /// Errors and timeouts are logged and yield no flag.
    pub async fn analyze_sentiment<S: SentimentService>(
        &self,
        segments: &[ResolvedSegment],
        examiner: &str,
        service: &S,
    ) -> Option<DemeanorFlag> {
        let (sample, first) = self.sentiment_sample(segments, examiner)?;

        let result = match tokio::time::timeout(
            self.config.sentiment_timeout,
            service.detect_sentiment(&sample),
        )
        .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!("Sentiment analysis failed: {}", e);
                return None;
            }
            Err(_) => {
                warn!(
                    "Sentiment analysis timed out after {:?}",
                    self.config.sentiment_timeout
                );
                return None;
            }
        };

        let negative = result.scores.negative;
        if result.sentiment == SentimentLabel::Negative
            && negative > self.config.negative_sentiment_threshold
        {
            Some(DemeanorFlag {
                flag_type: FlagType::NegativeSentiment,
                timestamp: first.start_time,
                transcript_excerpt: excerpt(&sample, self.config.excerpt_chars),
                severity: Severity::Medium,
                description: format!(
                    "Overall negative sentiment detected (score: {:.2})",
                    negative
                ),
                sentiment_scores: Some(result.scores),
            })
        } else {
            None
        }
    }

    /// Full demeanor pass over resolved segments
    pub async fn analyze_segments<S: SentimentService>(
        &self,
        segments: &[ResolvedSegment],
        examiner: &str,
        service: &S,
    ) -> Vec<DemeanorFlag> {
        let mut flags = self.analyze_lexical(segments, examiner);

        if let Some(flag) = self.analyze_sentiment(segments, examiner, service).await {
            flags.push(flag);
        }

        info!("Detected {} demeanor flags", flags.len());
        flags
    }

    /// Resolve every segment of `transcript` and analyze examiner demeanor
    pub async fn analyze_examiner_demeanor<S: SentimentService>(
        &self,
        transcript: &Transcript,
        examiner: &str,
        service: &S,
    ) -> Vec<DemeanorFlag> {
        self.analyze_segments(&resolve_segments(transcript), examiner, service)
            .await
    }
}

/// Longest prefix of `text` no larger than `max_bytes` ending on a char boundary
fn truncate_to_bytes(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
