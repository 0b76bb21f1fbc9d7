use tracing::info;

use crate::error::EngineResult;
use crate::io::{AnnotationResult, AnnotationStore};
use crate::models::{DeclaredStepRecord, DemeanorFlagRecord, NEXT_PROCESSING_STAGE, SessionProgress};

/// Result of Stage 3 persistence
#[derive(Debug, Default)]
pub struct Stage3Result {
    pub step_ids: Vec<String>,
    pub flag_ids: Vec<String>,
}

/// Execute Stage 3: persist declared steps and demeanor flags
///
/// Writes one record per detection and per flag, then advances the
/// session's processing stage. Any store failure aborts and propagates.
pub fn execute_stage3<S: AnnotationStore>(
    store: &S,
    result: &AnnotationResult,
    now: i64,
) -> EngineResult<Stage3Result> {
    let mut persisted = Stage3Result::default();

    for test in &result.declared_tests {
        let record = DeclaredStepRecord::from_detection(&result.session_id, test, now);
        store.put_declared_step(&record)?;
        info!("Persisted declared step: {} - {}", record.declared_step_id, record.label);
        persisted.step_ids.push(record.declared_step_id);
    }

    for flag in &result.demeanor_flags {
        let record = DemeanorFlagRecord::from_flag(&result.session_id, flag, now);
        store.put_demeanor_flag(&record)?;
        info!("Persisted demeanor flag: {} - {}", record.flag_id, record.flag_type);
        persisted.flag_ids.push(record.flag_id);
    }

    store.update_session_stage(&SessionProgress {
        session_id: result.session_id.clone(),
        processing_stage: NEXT_PROCESSING_STAGE.to_string(),
        updated_at: now,
    })?;

    Ok(persisted)
}
