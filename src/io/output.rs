use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{AiTestDeclaration, DemeanorFlag, FlagType, TestDetection};
use crate::taxonomy::{Category, Taxonomy};

/// Combined result of one annotation run
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationResult {
    pub session_id: String,
    pub declared_tests: Vec<TestDetection>,
    pub demeanor_flags: Vec<DemeanorFlag>,
    /// Suggestions from the LLM fallback, which carry no segment timestamp
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ai_declarations: Vec<AiTestDeclaration>,
    pub summary: AnnotationSummary,
    /// Filled in once the records are stored
    pub persisted_step_ids: Vec<String>,
    pub persisted_flag_ids: Vec<String>,
    /// Unix seconds
    pub processing_timestamp: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotationSummary {
    pub test_count: usize,
    pub flag_count: usize,
    pub tests_by_category: BTreeMap<Category, usize>,
    pub flags_by_type: BTreeMap<FlagType, usize>,
}

impl AnnotationSummary {
    pub fn new(tests: &[TestDetection], flags: &[DemeanorFlag], taxonomy: &Taxonomy) -> Self {
        let mut tests_by_category = BTreeMap::new();
        for test in tests {
            if let Some(signature) = taxonomy.get(&test.label) {
                *tests_by_category.entry(signature.category).or_insert(0) += 1;
            }
        }

        let mut flags_by_type = BTreeMap::new();
        for flag in flags {
            *flags_by_type.entry(flag.flag_type).or_insert(0) += 1;
        }

        Self {
            test_count: tests.len(),
            flag_count: flags.len(),
            tests_by_category,
            flags_by_type,
        }
    }
}

impl AnnotationResult {
    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable annotation report
pub struct AnnotationReport<'a> {
    result: &'a AnnotationResult,
}

impl<'a> AnnotationReport<'a> {
    pub fn new(result: &'a AnnotationResult) -> Self {
        Self { result }
    }

    /// Format the report as text
    pub fn format(&self) -> String {
        let mut output = String::new();
        let result = self.result;

        output.push_str(&format!("Session {}\n\n", result.session_id));

        output.push_str(&format!("Declared tests ({})\n", result.declared_tests.len()));
        for test in &result.declared_tests {
            output.push_str(&format!(
                "[{}] {} ({:.2}) by {}\n",
                format_timestamp(test.timestamp),
                test.label,
                test.confidence,
                test.speaker
            ));
            output.push_str(&indent(&wrap_text(&test.matched_text, 76)));
            output.push('\n');
        }

        output.push_str(&format!("\nDemeanor flags ({})\n", result.demeanor_flags.len()));
        for flag in &result.demeanor_flags {
            output.push_str(&format!(
                "[{}] {} [{}] {}\n",
                format_timestamp(flag.timestamp),
                flag.flag_type,
                flag.severity,
                flag.description
            ));
            output.push_str(&indent(&wrap_text(&flag.transcript_excerpt, 76)));
            output.push('\n');
        }

        if !result.ai_declarations.is_empty() {
            output.push_str(&format!(
                "\nLLM suggestions ({})\n",
                result.ai_declarations.len()
            ));
            for declaration in &result.ai_declarations {
                output.push_str(&format!(
                    "- {} ({}): {}\n",
                    declaration.test_type, declaration.approximate_time, declaration.declaration
                ));
            }
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format seconds as MM:SS.mmm
pub fn format_timestamp(seconds: f64) -> String {
    let ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let secs = ms / 1000;
    let millis = ms % 1000;
    format!("{:02}:{:02}.{:03}", secs / 60, secs % 60, millis)
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("    {}\n", line)).collect()
}

/// Greedy word wrap; `width` counts characters, not bytes
fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars > 0 && current_chars + 1 + word_chars > width {
            lines.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}
