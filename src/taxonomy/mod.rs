pub mod catalog;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub use catalog::{BUILTIN_ENTRIES, EntryDef};

/// Clinical domain of a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Orthopedic,
    Neurological,
    Sensory,
    Functional,
    /// Non-organic signs and symptom magnification checks
    Simulation,
    /// Manual muscle testing
    #[serde(rename = "MMT", alias = "mmt")]
    Mmt,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Orthopedic => "orthopedic",
            Category::Neurological => "neurological",
            Category::Sensory => "sensory",
            Category::Functional => "functional",
            Category::Simulation => "simulation",
            Category::Mmt => "MMT",
        })
    }
}

/// Informational only, never used in scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Medium => "medium",
            Priority::High => "high",
        })
    }
}

/// Serializable definition of a clinical test signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub label: String,
    /// Case-insensitive substrings
    pub keywords: Vec<String>,
    /// Regular expressions, matched case-insensitively
    #[serde(default)]
    pub patterns: Vec<String>,
    pub category: Category,
    pub priority: Priority,
}

impl From<&EntryDef> for TaxonomyEntry {
    fn from(def: &EntryDef) -> Self {
        Self {
            label: def.label.to_string(),
            keywords: def.keywords.iter().map(|k| k.to_string()).collect(),
            patterns: def.patterns.iter().map(|p| p.to_string()).collect(),
            category: def.category,
            priority: def.priority,
        }
    }
}

/// A taxonomy entry with its keywords normalized and patterns compiled
#[derive(Debug, Clone)]
pub struct Signature {
    pub label: String,
    /// Lower-cased, de-duplicated, in declaration order
    pub keywords: Vec<String>,
    pub patterns: Vec<Regex>,
    pub category: Category,
    pub priority: Priority,
}

impl Signature {
    pub fn compile(entry: &TaxonomyEntry) -> EngineResult<Self> {
        let mut seen = HashSet::new();
        let keywords = entry
            .keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .collect();

        let patterns = entry
            .patterns
            .iter()
            .map(|p| compile_pattern(&entry.label, p))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(Self {
            label: entry.label.clone(),
            keywords,
            patterns,
            category: entry.category,
            priority: entry.priority,
        })
    }

    /// Number of distinct keywords occurring in already lower-cased text
    pub fn keyword_matches(&self, text_lower: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| text_lower.contains(k.as_str()))
            .count()
    }

    pub fn matches_any_pattern(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Compile a pattern case-insensitively, naming its owner on failure
pub(crate) fn compile_pattern(label: &str, pattern: &str) -> EngineResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| EngineError::InvalidPattern {
            label: label.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// Read-only catalog of test signatures, in stable declaration order
#[derive(Debug, Clone)]
pub struct Taxonomy {
    signatures: Vec<Signature>,
}

impl Taxonomy {
    /// Compile a set of entries, rejecting duplicate labels
    pub fn from_entries(entries: &[TaxonomyEntry]) -> EngineResult<Self> {
        let mut labels = HashSet::new();
        let mut signatures = Vec::with_capacity(entries.len());

        for entry in entries {
            if entry.label.trim().is_empty() {
                return Err(EngineError::Taxonomy("entry with empty label".to_string()));
            }
            if !labels.insert(entry.label.as_str()) {
                return Err(EngineError::DuplicateLabel(entry.label.clone()));
            }
            signatures.push(Signature::compile(entry)?);
        }

        Ok(Self { signatures })
    }

    /// The built-in clinical test catalog
    pub fn builtin() -> EngineResult<Self> {
        let entries: Vec<TaxonomyEntry> = BUILTIN_ENTRIES.iter().map(TaxonomyEntry::from).collect();
        Self::from_entries(&entries)
    }

    /// Load a replacement catalog from a JSON array of entries
    pub fn from_json_file(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        let entries: Vec<TaxonomyEntry> = serde_json::from_str(json)?;
        Self::from_entries(&entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    pub fn get(&self, label: &str) -> Option<&Signature> {
        self.signatures.iter().find(|s| s.label == label)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
