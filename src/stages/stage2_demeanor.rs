use crate::analysis::DemeanorAnalyzer;
use crate::models::{DemeanorFlag, FlagType};
use crate::sentiment::SentimentService;

use super::ResolutionResult;

/// Result of Stage 2 demeanor analysis
#[derive(Debug, Default)]
pub struct Stage2Result {
    pub flags: Vec<DemeanorFlag>,
    /// Segments attributed to the examiner
    pub examiner_segments: usize,
}

impl Stage2Result {
    pub fn count(&self, flag_type: FlagType) -> usize {
        self.flags.iter().filter(|f| f.flag_type == flag_type).count()
    }
}

/// Execute Stage 2: examiner demeanor analysis
pub async fn execute_stage2<S: SentimentService>(
    analyzer: &DemeanorAnalyzer<'_>,
    resolved: &ResolutionResult,
    examiner: &str,
    sentiment: &S,
) -> Stage2Result {
    let examiner_segments = resolved
        .segments
        .iter()
        .filter(|s| s.speaker == examiner)
        .count();

    if examiner_segments == 0 {
        tracing::warn!("No segments attributed to examiner label {:?}", examiner);
    }

    let flags = analyzer
        .analyze_segments(&resolved.segments, examiner, sentiment)
        .await;

    Stage2Result {
        flags,
        examiner_segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{DemeanorConfig, ToneLexicon};
    use crate::models::ResolvedSegment;
    use crate::sentiment::NoSentiment;

    #[tokio::test]
    async fn test_stage2_counts() {
        let lexicon = ToneLexicon::builtin().unwrap();
        let analyzer = DemeanorAnalyzer::new(&lexicon, DemeanorConfig::default());
        let resolved = ResolutionResult {
            segments: ["spk_0", "spk_0", "spk_0", "spk_1"]
                .iter()
                .enumerate()
                .map(|(i, speaker)| ResolvedSegment {
                    speaker: speaker.to_string(),
                    start_time: i as f64,
                    end_time: i as f64 + 0.5,
                    text: "okay".to_string(),
                })
                .collect(),
            empty_segments: 0,
        };

        let result = execute_stage2(&analyzer, &resolved, "spk_0", &NoSentiment).await;

        assert_eq!(result.examiner_segments, 3);
        assert_eq!(result.count(FlagType::Interruption), 1);
        assert_eq!(result.flags[0].timestamp, 2.0);
    }
}
