use anyhow::{Context, Result};
use tracing::{error, info};

use crate::models::AiTestDeclaration;

use super::{AnthropicClient, build_test_detection_prompt};

/// Ask the LLM for declared tests when pattern matching found none
///
/// Best effort: every failure is logged and returns an empty list.
pub async fn detect_tests_with_llm(
    client: &AnthropicClient,
    transcript_text: &str,
) -> Vec<AiTestDeclaration> {
    if transcript_text.trim().is_empty() {
        return Vec::new();
    }

    let prompt = build_test_detection_prompt(transcript_text);

    let reply = match client.send_message(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Error in LLM test detection: {:#}", e);
            return Vec::new();
        }
    };

    match parse_declarations(&reply) {
        Ok(declarations) => {
            info!("LLM suggested {} test declarations", declarations.len());
            declarations
        }
        Err(e) => {
            error!("Error parsing LLM test detection reply: {:#}", e);
            Vec::new()
        }
    }
}

/// Parse a JSON array of declarations, tolerating a Markdown code fence
pub fn parse_declarations(reply: &str) -> Result<Vec<AiTestDeclaration>> {
    let body = strip_code_fence(reply);
    let declarations: Vec<AiTestDeclaration> =
        serde_json::from_str(body).context("Reply is not a JSON array of declarations")?;

    Ok(declarations
        .into_iter()
        .filter(|d| !d.test_type.trim().is_empty())
        .collect())
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the optional language tag on the opening fence line
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
