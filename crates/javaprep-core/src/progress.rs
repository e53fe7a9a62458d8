//! Per-question learning progress and its persistence.
//!
//! The tracker reads the store once when it is created and writes a full
//! snapshot after every status change. Store failures never abort the
//! caller: a failed load starts everyone at `NotStarted`, a failed save is
//! logged and the in-memory state stays authoritative.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::error::ProgressError;
use crate::model::{Question, QuestionBank, QuestionId, Status};
use crate::statistics::{category_stats, summarize_progress, CategoryStats, ProgressSummary};

/// Status of every known question, keyed by id.
pub type ProgressMap = BTreeMap<QuestionId, Status>;

/// Fixed key the progress blob is stored under.
pub const PROGRESS_KEY: &str = "javaInterviewProgress";

/// Durable storage for the progress map.
///
/// `save` overwrites the whole map and must be safe to repeat with the same payload.
pub trait ProgressStore: Send + Sync {
    fn load(&self) -> Result<ProgressMap>;
    fn save(&self, progress: &ProgressMap) -> Result<()>;
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// Stores progress as a JSON object in `<dir>/javaInterviewProgress.json`.
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    /// Store inside `dir`, under the well-known file name.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{PROGRESS_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> Result<ProgressMap> {
        if !self.path.exists() {
            return Ok(ProgressMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read progress from {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(ProgressMap::new());
        }
        let map: ProgressMap = serde_json::from_str(&content)
            .map_err(|e| ProgressError::Corrupt(e.to_string()))
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(map)
    }

    fn save(&self, progress: &ProgressMap) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let json = serde_json::to_string_pretty(progress).context("failed to serialize progress")?;
        // Write beside the target and rename so readers never see a partial file.
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to write progress to {}", self.path.display()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Memory store
// ---------------------------------------------------------------------------

/// In-memory store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    data: Mutex<Option<ProgressMap>>,
    saves: Mutex<usize>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing blob.
    pub fn with_progress(progress: ProgressMap) -> Self {
        Self {
            data: Mutex::new(Some(progress)),
            saves: Mutex::new(0),
        }
    }

    /// The last saved map, if any.
    pub fn snapshot(&self) -> Option<ProgressMap> {
        self.data.lock().ok().and_then(|d| d.clone())
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<ProgressMap> {
        let data = self
            .data
            .lock()
            .map_err(|_| anyhow::anyhow!("progress store lock poisoned"))?;
        Ok(data.clone().unwrap_or_default())
    }

    fn save(&self, progress: &ProgressMap) -> Result<()> {
        *self
            .data
            .lock()
            .map_err(|_| anyhow::anyhow!("progress store lock poisoned"))? = Some(progress.clone());
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Catalog questions with their current statuses, backed by a store.
pub struct ProgressTracker {
    bank: QuestionBank,
    questions: Vec<Question>,
    store: Box<dyn ProgressStore>,
}

impl ProgressTracker {
    /// Read the store once and stamp statuses onto the catalog.
    ///
    /// Questions without a stored status start at `NotStarted`; stored ids
    /// that are not in the catalog are dropped on the next save.
    pub fn load(bank: QuestionBank, store: Box<dyn ProgressStore>) -> Self {
        let stored = store.load().unwrap_or_else(|e| {
            tracing::warn!("could not load progress, starting fresh: {e:#}");
            ProgressMap::new()
        });

        let questions = bank
            .questions()
            .into_iter()
            .map(|mut q| {
                q.status = stored.get(&q.id).copied().unwrap_or_default();
                q
            })
            .collect();

        Self {
            bank,
            questions,
            store,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Catalog questions with statuses applied, in catalog order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn status(&self, id: QuestionId) -> Option<Status> {
        self.questions.iter().find(|q| q.id == id).map(|q| q.status)
    }

    /// Complete map covering every catalog question.
    pub fn snapshot(&self) -> ProgressMap {
        self.questions.iter().map(|q| (q.id, q.status)).collect()
    }

    /// Change one question's status and persist the full snapshot.
    pub fn set_status(&mut self, id: QuestionId, status: Status) -> Result<(), ProgressError> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(ProgressError::UnknownQuestion(id))?;
        question.status = status;
        tracing::debug!(id, %status, "status updated");

        if let Err(e) = self.store.save(&self.snapshot()) {
            tracing::warn!("could not save progress: {e:#}");
        }
        Ok(())
    }

    pub fn summary(&self) -> ProgressSummary {
        summarize_progress(&self.questions)
    }

    pub fn category_stats(&self) -> Vec<CategoryStats> {
        category_stats(&self.bank, &self.questions)
    }
}
