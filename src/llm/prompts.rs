use crate::models::excerpt;

/// Characters of transcript included in the fallback prompt
pub const MAX_PROMPT_TRANSCRIPT_CHARS: usize = 4000;

/// Build the prompt asking for declared tests in a transcript excerpt
pub fn build_test_detection_prompt(transcript_text: &str) -> String {
    let transcript = excerpt(transcript_text, MAX_PROMPT_TRANSCRIPT_CHARS);

    format!(
        r#"You are analyzing a transcript of a compulsory medical examination.
Extract all instances where the examiner declares they are performing a specific medical test or examination.

Transcript:
{transcript}

For each declared test, return JSON with:
- test_type: The type of medical test (e.g., "lumbar_rom", "straight_leg_raise", "gait", "reflex")
- declaration: The exact words the examiner used
- approximate_time: An estimate of when this occurred in the conversation (e.g., "early", "middle", "late")

Return ONLY a JSON array of test declarations, no additional text:
[{{"test_type": "...", "declaration": "...", "approximate_time": "..."}}]"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_truncates_transcript() {
        let text = "x".repeat(5000);
        let prompt = build_test_detection_prompt(&text);

        assert!(prompt.contains(&"x".repeat(4000)));
        assert!(!prompt.contains(&"x".repeat(4001)));
        assert!(prompt.contains(r#"[{"test_type": "...""#));
    }
}
