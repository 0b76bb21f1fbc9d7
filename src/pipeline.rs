use tracing::info;

use crate::analysis::{DemeanorAnalyzer, DemeanorConfig, IntentConfig, TestIntentDetector, ToneLexicon};
use crate::error::EngineResult;
use crate::io::{AnnotationResult, AnnotationStore, AnnotationSummary};
use crate::llm::AnthropicClient;
use crate::models::Transcript;
use crate::sentiment::SentimentService;
use crate::stages::{execute_stage1, execute_stage2, execute_stage3, resolve};
use crate::taxonomy::Taxonomy;

/// Default diarization label of the examiner
pub const DEFAULT_EXAMINER_LABEL: &str = "spk_0";

/// Configuration for a full annotation run
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    /// Speaker label whose conduct is analyzed
    pub examiner_label: String,
    pub intent: IntentConfig,
    pub demeanor: DemeanorConfig,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            examiner_label: DEFAULT_EXAMINER_LABEL.to_string(),
            intent: IntentConfig::default(),
            demeanor: DemeanorConfig::default(),
        }
    }
}

/// Runs both analyzers over a transcript and shapes the combined result
///
/// The taxonomy and lexicon are built once per process and shared.
pub struct Annotator<'a, S> {
    taxonomy: &'a Taxonomy,
    lexicon: &'a ToneLexicon,
    sentiment: &'a S,
    fallback: Option<&'a AnthropicClient>,
    config: AnnotateConfig,
}

impl<'a, S: SentimentService> Annotator<'a, S> {
    pub fn new(
        taxonomy: &'a Taxonomy,
        lexicon: &'a ToneLexicon,
        sentiment: &'a S,
        config: AnnotateConfig,
    ) -> Self {
        Self {
            taxonomy,
            lexicon,
            sentiment,
            fallback: None,
            config,
        }
    }

    /// Enable the LLM fallback for transcripts with no pattern detections
    pub fn with_fallback(mut self, client: &'a AnthropicClient) -> Self {
        self.fallback = Some(client);
        self
    }

    /// Analyze one transcript without persisting anything
    pub async fn annotate(&self, session_id: &str, transcript: &Transcript) -> AnnotationResult {
        info!("Stage 0: Resolving segment text...");
        let resolved = resolve(transcript);

        info!("Stage 1: Detecting declared tests...");
        let detector = TestIntentDetector::new(self.taxonomy, self.config.intent.clone());
        let stage1 = execute_stage1(&detector, &resolved, self.fallback).await;

        info!("Stage 2: Analyzing examiner demeanor...");
        let analyzer = DemeanorAnalyzer::new(self.lexicon, self.config.demeanor.clone());
        let stage2 = execute_stage2(
            &analyzer,
            &resolved,
            &self.config.examiner_label,
            self.sentiment,
        )
        .await;

        let summary = AnnotationSummary::new(&stage1.detections, &stage2.flags, self.taxonomy);

        AnnotationResult {
            session_id: session_id.to_string(),
            declared_tests: stage1.detections,
            demeanor_flags: stage2.flags,
            ai_declarations: stage1.ai_declarations,
            summary,
            persisted_step_ids: Vec::new(),
            persisted_flag_ids: Vec::new(),
            processing_timestamp: chrono::Utc::now().timestamp(),
            status: "completed".to_string(),
        }
    }

    /// Analyze one transcript and write its records to `store`
    ///
    /// Store failures propagate so the caller can retry the whole step.
    pub async fn annotate_and_persist<T: AnnotationStore>(
        &self,
        session_id: &str,
        transcript: &Transcript,
        store: &T,
    ) -> EngineResult<AnnotationResult> {
        let mut result = self.annotate(session_id, transcript).await;

        info!("Stage 3: Persisting annotations...");
        let persisted = execute_stage3(store, &result, chrono::Utc::now().timestamp())?;
        result.persisted_step_ids = persisted.step_ids;
        result.persisted_flag_ids = persisted.flag_ids;

        info!(
            "Annotation complete: {} tests, {} flags",
            result.summary.test_count, result.summary.flag_count
        );
        Ok(result)
    }
}
