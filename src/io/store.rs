use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DeclaredStepRecord, DemeanorFlagRecord, SessionProgress};

pub const DECLARED_STEPS_FILE: &str = "declared_steps.jsonl";
pub const DEMEANOR_FLAGS_FILE: &str = "demeanor_flags.jsonl";
pub const SESSIONS_FILE: &str = "sessions.json";

/// Durable keyed store for annotation output
pub trait AnnotationStore {
    fn put_declared_step(&self, record: &DeclaredStepRecord) -> EngineResult<()>;

    fn put_demeanor_flag(&self, record: &DemeanorFlagRecord) -> EngineResult<()>;

    /// Set the session's processing stage, creating the entry if needed
    fn update_session_stage(&self, progress: &SessionProgress) -> EngineResult<()>;
}

/// Store backed by JSON-lines files in one directory
#[derive(Debug, Clone)]
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    /// Open (and create if needed) a store directory
    pub fn open(dir: impl Into<PathBuf>) -> EngineResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            EngineError::Store(format!("cannot create store directory {:?}: {}", dir, e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn declared_steps(&self) -> EngineResult<Vec<DeclaredStepRecord>> {
        read_lines(&self.dir.join(DECLARED_STEPS_FILE))
    }

    pub fn demeanor_flags(&self) -> EngineResult<Vec<DemeanorFlagRecord>> {
        read_lines(&self.dir.join(DEMEANOR_FLAGS_FILE))
    }

    pub fn sessions(&self) -> EngineResult<BTreeMap<String, SessionProgress>> {
        let path = self.dir.join(SESSIONS_FILE);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl AnnotationStore for JsonlStore {
    fn put_declared_step(&self, record: &DeclaredStepRecord) -> EngineResult<()> {
        append_line(&self.dir.join(DECLARED_STEPS_FILE), record)?;
        debug!("Stored declared step {}", record.declared_step_id);
        Ok(())
    }

    fn put_demeanor_flag(&self, record: &DemeanorFlagRecord) -> EngineResult<()> {
        append_line(&self.dir.join(DEMEANOR_FLAGS_FILE), record)?;
        debug!("Stored demeanor flag {}", record.flag_id);
        Ok(())
    }

    fn update_session_stage(&self, progress: &SessionProgress) -> EngineResult<()> {
        let mut sessions = self.sessions()?;
        sessions.insert(progress.session_id.clone(), progress.clone());

        // sessions.json is only ever replaced whole
        let path = self.dir.join(SESSIONS_FILE);
        let tmp = self.dir.join(format!("{}.tmp", SESSIONS_FILE));
        let content = serde_json::to_string_pretty(&sessions)?;
        std::fs::write(&tmp, content)
            .map_err(|e| EngineError::Store(format!("cannot write {:?}: {}", tmp, e)))?;
        std::fs::rename(&tmp, &path)
            .map_err(|e| EngineError::Store(format!("cannot replace {:?}: {}", path, e)))?;
        Ok(())
    }
}

fn append_line<T: Serialize>(path: &Path, record: &T) -> EngineResult<()> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| EngineError::Store(format!("cannot open {:?}: {}", path, e)))?;
    file.write_all(line.as_bytes())
        .map_err(|e| EngineError::Store(format!("cannot append to {:?}: {}", path, e)))?;
    Ok(())
}

fn read_lines<T: DeserializeOwned>(path: &Path) -> EngineResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}
