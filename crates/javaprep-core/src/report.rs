//! Interview report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::is_failure_feedback;
use crate::model::{Difficulty, QuestionBank, QuestionId};
use crate::session::Outcome;
use crate::statistics::{score_band, ScoreBand};

/// A finished interview, ready to save or render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Which question bank the interview drew from.
    pub bank: BankSummary,
    /// Evaluator that scored the answers.
    pub evaluator: String,
    /// One row per question, in interview order.
    pub rows: Vec<ReportRow>,
    /// Mean score rounded to one decimal place.
    pub average_score: f64,
    pub band: ScoreBand,
    /// Wall-clock evaluation time in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a question bank (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl From<&QuestionBank> for BankSummary {
    fn from(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            question_count: bank.question_count(),
        }
    }
}

/// One evaluated answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub question_id: QuestionId,
    pub question: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub user_answer: String,
    pub score: f64,
    pub strengths: String,
    pub improvements: String,
    /// The candidate looked at the reference answer.
    pub hint_revealed: bool,
    /// The score is the failure placeholder, not a real evaluation.
    pub evaluation_failed: bool,
}

impl InterviewReport {
    /// Build a report from a finished session.
    pub fn from_outcome(
        bank: &QuestionBank,
        evaluator: &str,
        outcome: &Outcome,
        duration_ms: u64,
    ) -> Self {
        let rows = outcome
            .results()
            .iter()
            .map(|r| ReportRow {
                question_id: r.question.id,
                question: r.question.question.clone(),
                category: r.question.category.clone(),
                difficulty: r.question.difficulty,
                user_answer: r.user_answer.clone(),
                score: r.feedback.score,
                strengths: r.feedback.feedback.strengths.clone(),
                improvements: r.feedback.feedback.improvements.clone(),
                hint_revealed: outcome.hint_revealed(r.question.id),
                evaluation_failed: is_failure_feedback(&r.feedback),
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary::from(bank),
            evaluator: evaluator.to_string(),
            rows,
            average_score: outcome.average_score(),
            band: score_band(outcome.average_score()),
            duration_ms,
        }
    }

    /// Number of rows whose evaluation failed.
    pub fn failed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.evaluation_failed).count()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: InterviewReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
