use tracing::{debug, info};

use crate::models::{ResolvedSegment, TestDetection, Transcript, excerpt};
use crate::taxonomy::{Signature, Taxonomy};

use super::resolver::resolve_segments;

/// First-person phrases that mark an examiner announcing what they are doing
pub const DECLARATION_PHRASES: &[&str] = &[
    "now we",
    "let's",
    "going to",
    "want to",
    "need to",
    "i'm going to",
    "i'm checking",
    "i need",
    "we're going to",
];

/// Scoring constants for test intent detection
#[derive(Debug, Clone)]
pub struct IntentConfig {
    /// Minimum confidence for a detection to be emitted
    pub acceptance_threshold: f64,
    /// Weight of the keyword coverage term
    pub keyword_weight: f64,
    /// Flat bonus when any pattern matches
    pub pattern_weight: f64,
    /// Bonus for a declaration phrase, only applied on top of existing signal
    pub declaration_bonus: f64,
    /// Length of `matched_text` in characters
    pub excerpt_chars: usize,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.5,
            keyword_weight: 0.3,
            pattern_weight: 0.7,
            declaration_bonus: 0.2,
            excerpt_chars: 200,
        }
    }
}

/// Scores segment text against every taxonomy entry
pub struct TestIntentDetector<'a> {
    taxonomy: &'a Taxonomy,
    config: IntentConfig,
}

impl<'a> TestIntentDetector<'a> {
    pub fn new(taxonomy: &'a Taxonomy, config: IntentConfig) -> Self {
        Self { taxonomy, config }
    }

    /// Confidence in [0, 1] that `text` declares the test described by `signature`
    pub fn score_text(&self, signature: &Signature, text: &str) -> f64 {
        let text_lower = text.to_lowercase();
        self.score_lowered(signature, &text_lower)
    }

    fn score_lowered(&self, signature: &Signature, text_lower: &str) -> f64 {
        let mut confidence = 0.0;

        let keyword_matches = signature.keyword_matches(text_lower);
        if keyword_matches > 0 {
            let coverage = keyword_matches as f64 / signature.keywords.len() as f64;
            confidence += self.config.keyword_weight * coverage.min(1.0);
        }

        if signature.matches_any_pattern(text_lower) {
            confidence += self.config.pattern_weight;
        }

        if confidence > 0.0 && has_declaration_phrase(text_lower) {
            confidence += self.config.declaration_bonus;
        }

        confidence.clamp(0.0, 1.0)
    }

    /// Detections for a single piece of segment text
    pub fn analyze_text(&self, text: &str, timestamp: f64) -> Vec<(String, f64)> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let text_lower = text.to_lowercase();

        self.taxonomy
            .iter()
            .filter_map(|signature| {
                let confidence = self.score_lowered(signature, &text_lower);
                if confidence >= self.config.acceptance_threshold {
                    debug!(
                        "Detected {} at {:.2}s (confidence {:.2})",
                        signature.label, timestamp, confidence
                    );
                    Some((signature.label.clone(), confidence))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Run detection over already-resolved segments
    ///
    /// Every segment is a candidate regardless of speaker; the speaker is
    /// carried on each detection for downstream filtering.
    pub fn detect_in_segments(&self, segments: &[ResolvedSegment]) -> Vec<TestDetection> {
        let mut detections = Vec::new();

        for segment in segments {
            for (label, confidence) in self.analyze_text(&segment.text, segment.start_time) {
                detections.push(TestDetection {
                    label,
                    timestamp: segment.start_time,
                    confidence,
                    matched_text: excerpt(&segment.text, self.config.excerpt_chars),
                    speaker: segment.speaker.clone(),
                    transcript_text: segment.text.clone(),
                });
            }
        }

        info!("Detected {} test declarations", detections.len());
        detections
    }

    /// Resolve every segment of `transcript` and detect declared tests
    pub fn detect_declared_tests(&self, transcript: &Transcript) -> Vec<TestDetection> {
        self.detect_in_segments(&resolve_segments(transcript))
    }
}

fn has_declaration_phrase(text_lower: &str) -> bool {
    DECLARATION_PHRASES.iter().any(|p| text_lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SpeakerSegment, TranscriptItem};
    use crate::taxonomy::{Category, Priority, TaxonomyEntry};

    fn transcript_from_words(speaker: &str, words: &[&str]) -> Transcript {
        let mut items = Vec::new();
        for (i, word) in words.iter().enumerate() {
            if *word == "," {
                items.push(TranscriptItem::punctuation(","));
            } else {
                items.push(TranscriptItem::word(*word, 10.0 + i as f64 * 0.3));
            }
        }
        let end = 10.0 + words.len() as f64 * 0.3;
        Transcript::new(items, vec![SpeakerSegment::new(speaker, 10.0, end)])
    }

    fn single_entry_taxonomy() -> Taxonomy {
        Taxonomy::from_entries(&[TaxonomyEntry {
            label: "gait_observation".to_string(),
            keywords: vec![
                "gait".to_string(),
                "antalgic".to_string(),
                "limping".to_string(),
                "walking".to_string(),
            ],
            patterns: vec![r"gait\s+(?:was|is)\s+(?:antalgic|normal)".to_string()],
            category: Category::Functional,
            priority: Priority::High,
        }])
        .unwrap()
    }

    #[test]
    fn test_straight_leg_raise_declaration() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());
        let transcript = transcript_from_words(
            "spk_0",
            &[
                "Now", "we're", "going", "to", "check", "straight", "leg", "raise", ",",
                "positive", "at", "30", "degrees",
            ],
        );

        let detections = detector.detect_declared_tests(&transcript);
        let slr = detections
            .iter()
            .find(|d| d.label == "straight_leg_raise")
            .expect("straight leg raise detected");

        assert!(slr.confidence >= 0.5);
        assert_eq!(slr.timestamp, 10.0);
        assert_eq!(slr.speaker, "spk_0");
        assert!(slr.matched_text.starts_with("Now we're going to check"));
    }

    #[test]
    fn test_confidence_components() {
        let taxonomy = single_entry_taxonomy();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());
        let gait = taxonomy.get("gait_observation").unwrap();

        // One of four keywords: 0.3 * 0.25
        assert!((detector.score_text(gait, "her gait") - 0.075).abs() < 1e-9);
        // Keyword plus pattern
        assert!((detector.score_text(gait, "gait is antalgic") - (0.15 + 0.7)).abs() < 1e-9);
        // Keyword, pattern and declaration, capped at 1.0
        assert_eq!(detector.score_text(gait, "I need to see if gait is antalgic"), 1.0);
    }

    #[test]
    fn test_declaration_bonus_alone_is_zero() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());
        let text = "now we are going to want to";

        for signature in taxonomy.iter() {
            assert_eq!(detector.score_text(signature, text), 0.0, "{}", signature.label);
        }
        assert!(detector.analyze_text(text, 0.0).is_empty());
    }

    #[test]
    fn test_no_signal_no_detection() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());

        assert!(detector.analyze_text("how was your weekend", 1.0).is_empty());
        assert!(detector.analyze_text("", 1.0).is_empty());
    }

    #[test]
    fn test_keywords_alone_below_threshold() {
        let taxonomy = single_entry_taxonomy();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());

        // All keywords, no pattern, with declaration: 0.3 + 0.2 = 0.5 which is accepted
        let all = detector.analyze_text("let's watch the gait, antalgic and limping while walking", 0.0);
        assert_eq!(all.len(), 1);
        assert!((all[0].1 - 0.5).abs() < 1e-9);

        // All keywords without declaration stay at 0.3
        assert!(
            detector
                .analyze_text("gait antalgic limping walking", 0.0)
                .is_empty()
        );
    }

    #[test]
    fn test_confidence_bounded_and_monotonic() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());
        let texts = [
            "",
            "reflex",
            "reflex patellar",
            "reflex patellar achilles brisk",
            "patellar reflex is brisk",
            "i'm checking deep tendon reflexes, patellar reflex 2+ and brisk, achilles absent",
        ];

        for signature in taxonomy.iter() {
            for text in texts {
                let score = detector.score_text(signature, text);
                assert!((0.0..=1.0).contains(&score));
            }
        }

        let dtr = taxonomy.get("deep_tendon_reflexes").unwrap();
        let scores: Vec<f64> = texts[1..4].iter().map(|t| detector.score_text(dtr, t)).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_multiple_entries_per_segment() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());

        let labels: Vec<String> = detector
            .analyze_text("Let's do heel walking and then toe walking", 3.0)
            .into_iter()
            .map(|(label, _)| label)
            .collect();

        assert!(labels.contains(&"heel_walking".to_string()));
        assert!(labels.contains(&"toe_walking".to_string()));
        // Taxonomy order, not match order
        let heel = labels.iter().position(|l| l == "heel_walking").unwrap();
        let toe = labels.iter().position(|l| l == "toe_walking").unwrap();
        assert!(heel < toe);
    }

    #[test]
    fn test_matched_text_truncated_original_case() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());
        let long_text = format!("Romberg test now {}", "word ".repeat(100));
        let segments = vec![ResolvedSegment {
            speaker: "spk_0".to_string(),
            start_time: 4.0,
            end_time: 9.0,
            text: long_text.clone(),
        }];

        let detections = detector.detect_in_segments(&segments);
        let romberg = detections.iter().find(|d| d.label == "romberg_test").unwrap();

        assert_eq!(romberg.matched_text.chars().count(), 200);
        assert!(romberg.matched_text.starts_with("Romberg"));
        assert_eq!(romberg.transcript_text, long_text);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());
        let transcript = transcript_from_words(
            "spk_0",
            &["I'm", "checking", "light", "touch", "sensation", "and", "pinprick", "sensation"],
        );

        let first = detector.detect_declared_tests(&transcript);
        let second = detector.detect_declared_tests(&transcript);

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_transcript() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let detector = TestIntentDetector::new(&taxonomy, IntentConfig::default());
        assert!(detector.detect_declared_tests(&Transcript::default()).is_empty());
    }
}
