use serde::{Deserialize, Serialize};

use super::{DemeanorFlag, FlagType, Severity, TestDetection};

/// Processing stage a session moves to once annotation is stored
pub const NEXT_PROCESSING_STAGE: &str = "video_analysis";

/// Durable record for one declared test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredStepRecord {
    pub declared_step_id: String,
    pub session_id: String,
    pub timestamp: f64,
    pub label: String,
    pub transcript_text: String,
    pub confidence: f64,
    /// Filled in later by the video stage
    pub video_snippet_uri: String,
    /// Unix seconds
    pub created_at: i64,
}

impl DeclaredStepRecord {
    pub fn from_detection(session_id: &str, detection: &TestDetection, created_at: i64) -> Self {
        Self {
            declared_step_id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            timestamp: detection.timestamp,
            label: detection.label.clone(),
            transcript_text: detection.matched_text.clone(),
            confidence: detection.confidence,
            video_snippet_uri: String::new(),
            created_at,
        }
    }
}

/// Durable record for one demeanor flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemeanorFlagRecord {
    pub flag_id: String,
    pub session_id: String,
    pub timestamp: f64,
    pub flag_type: FlagType,
    pub transcript_excerpt: String,
    pub severity: Severity,
    pub description: String,
    /// Unix seconds
    pub created_at: i64,
}

impl DemeanorFlagRecord {
    pub fn from_flag(session_id: &str, flag: &DemeanorFlag, created_at: i64) -> Self {
        Self {
            flag_id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            timestamp: flag.timestamp,
            flag_type: flag.flag_type,
            transcript_excerpt: flag.transcript_excerpt.clone(),
            severity: flag.severity,
            description: flag.description.clone(),
            created_at,
        }
    }
}

/// Progress marker for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub session_id: String,
    pub processing_stage: String,
    /// Unix seconds
    pub updated_at: i64,
}
