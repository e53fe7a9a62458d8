pub mod flashcards;
pub mod init;
pub mod interview;
pub mod mark;
pub mod progress;
pub mod study;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use javaprep_core::model::{QuestionBank, Status};
use javaprep_core::parser;
use javaprep_core::progress::{FileProgressStore, ProgressTracker};
use javaprep_providers::{load_config_from, JavaprepConfig};

/// Loaded config plus the question bank a command operates on.
pub(crate) struct Workspace {
    pub config: JavaprepConfig,
    pub bank: QuestionBank,
}

impl Workspace {
    /// Load config, then the bank from `--bank` or the config's `question_bank`.
    pub fn open(config_path: Option<&Path>, bank: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let bank_path = bank.or_else(|| config.question_bank.clone()).context(
            "no question bank given; pass --bank or set question_bank in javaprep.toml",
        )?;
        let bank = parser::load_bank(&bank_path)?;
        Ok(Self { config, bank })
    }

    /// Progress tracker over this bank, stored under `--data-dir` or the configured directory.
    pub fn tracker(self, data_dir: Option<PathBuf>) -> ProgressTracker {
        let dir = data_dir.unwrap_or_else(|| self.config.data_dir.clone());
        ProgressTracker::load(self.bank, Box::new(FileProgressStore::in_dir(&dir)))
    }
}

pub(crate) fn parse_status(s: &str) -> Result<Status> {
    s.parse::<Status>().map_err(anyhow::Error::msg)
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Shorten text for table cells, counting characters rather than bytes.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
