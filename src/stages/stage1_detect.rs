use tracing::info;

use crate::analysis::TestIntentDetector;
use crate::llm::{AnthropicClient, detect_tests_with_llm};
use crate::models::{AiTestDeclaration, TestDetection};

use super::ResolutionResult;

/// Result of Stage 1 detection
#[derive(Debug, Default)]
pub struct Stage1Result {
    /// Pattern-based detections, each anchored to a segment
    pub detections: Vec<TestDetection>,
    /// LLM suggestions, only present when the fallback ran
    pub ai_declarations: Vec<AiTestDeclaration>,
    /// Whether the LLM fallback was called
    pub used_fallback: bool,
}

/// Execute Stage 1: test intent detection
///
/// The LLM fallback, when a client is supplied, only runs if pattern
/// matching found nothing in the whole transcript.
pub async fn execute_stage1(
    detector: &TestIntentDetector<'_>,
    resolved: &ResolutionResult,
    fallback: Option<&AnthropicClient>,
) -> Stage1Result {
    let detections = detector.detect_in_segments(&resolved.segments);

    let mut result = Stage1Result {
        detections,
        ..Default::default()
    };

    if let Some(client) = fallback {
        if result.detections.is_empty() {
            info!("Stage 1: no pattern detections, trying LLM fallback");
            result.ai_declarations = detect_tests_with_llm(client, &resolved.full_text()).await;
            result.used_fallback = true;
        }
    }

    result
}
