use regex::Regex;

use crate::error::EngineResult;
use crate::taxonomy::compile_pattern;

/// Hostile or incredulous expressions, matched as literal substrings
///
/// `really?` and `seriously?` need the question mark. Segment text resolved
/// from transcription items has no punctuation, so they only fire on text
/// scanned directly.
pub const NEGATIVE_TONE_PHRASES: &[&str] = &[
    "that's ridiculous",
    "you're lying",
    "i don't believe",
    "that's impossible",
    "come on",
    "really?",
    "seriously?",
    "you're exaggerating",
    "that doesn't make sense",
];

/// Expressions that wave away what the examinee says
pub const DISMISSIVE_PATTERNS: &[&str] = &[
    r"(?:doesn't|does\s+not)\s+matter",
    r"not\s+important",
    r"(?:don't|do\s+not)\s+care\s+about",
    r"that's\s+(?:irrelevant|not\s+relevant)",
];

/// Commands to stop talking or be quiet
pub const AGGRESSIVE_PATTERNS: &[&str] = &[
    r"stop\s+(?:talking|speaking)",
    r"let\s+me\s+(?:speak|talk)",
    r"don't\s+(?:interrupt|talk)",
    r"be\s+quiet",
    r"shut\s+up",
];

/// What a single lexical match means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToneMatch {
    /// Literal hostile phrase, carried for the flag description
    Negative(String),
    Dismissive,
    Aggressive,
}

/// Compiled tone tables, shared read-only
#[derive(Debug, Clone)]
pub struct ToneLexicon {
    negative_phrases: Vec<String>,
    dismissive: Vec<Regex>,
    aggressive: Vec<Regex>,
}

impl ToneLexicon {
    pub fn builtin() -> EngineResult<Self> {
        Self::new(NEGATIVE_TONE_PHRASES, DISMISSIVE_PATTERNS, AGGRESSIVE_PATTERNS)
    }

    pub fn new(
        negative_phrases: &[&str],
        dismissive: &[&str],
        aggressive: &[&str],
    ) -> EngineResult<Self> {
        Ok(Self {
            negative_phrases: negative_phrases.iter().map(|p| p.to_lowercase()).collect(),
            dismissive: dismissive
                .iter()
                .map(|p| compile_pattern("dismissive", p))
                .collect::<EngineResult<_>>()?,
            aggressive: aggressive
                .iter()
                .map(|p| compile_pattern("aggressive", p))
                .collect::<EngineResult<_>>()?,
        })
    }

    /// Every match in lower-cased text: one per phrase, one per pattern
    ///
    /// Negative phrases come first, then dismissive, then aggressive.
    pub fn scan(&self, text_lower: &str) -> Vec<ToneMatch> {
        let mut matches = Vec::new();

        for phrase in &self.negative_phrases {
            if text_lower.contains(phrase.as_str()) {
                matches.push(ToneMatch::Negative(phrase.clone()));
            }
        }

        for pattern in &self.dismissive {
            if pattern.is_match(text_lower) {
                matches.push(ToneMatch::Dismissive);
            }
        }

        for pattern in &self.aggressive {
            if pattern.is_match(text_lower) {
                matches.push(ToneMatch::Aggressive);
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_phrase_matches_once() {
        let lexicon = ToneLexicon::builtin().unwrap();
        let matches = lexicon.scan("that's ridiculous, come on. come on!");

        assert_eq!(
            matches,
            vec![
                ToneMatch::Negative("that's ridiculous".to_string()),
                ToneMatch::Negative("come on".to_string()),
            ]
        );
    }

    #[test]
    fn test_categories_are_additive() {
        let lexicon = ToneLexicon::builtin().unwrap();
        let matches = lexicon.scan("seriously? that's irrelevant. be quiet and let me talk");

        assert_eq!(matches.len(), 4);
        assert_eq!(matches[0], ToneMatch::Negative("seriously?".to_string()));
        assert_eq!(matches[1], ToneMatch::Dismissive);
        assert_eq!(matches[2], ToneMatch::Aggressive);
        assert_eq!(matches[3], ToneMatch::Aggressive);
    }

    #[test]
    fn test_question_phrases_need_punctuation() {
        let lexicon = ToneLexicon::builtin().unwrap();

        assert!(lexicon.scan("really that hurts seriously").is_empty());
        assert_eq!(
            lexicon.scan("really? that hurts"),
            vec![ToneMatch::Negative("really?".to_string())]
        );
    }

    #[test]
    fn test_polite_text_is_clean() {
        let lexicon = ToneLexicon::builtin().unwrap();
        assert!(lexicon.scan("thank you, please lie back on the table").is_empty());
    }
}
