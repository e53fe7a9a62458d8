//! Interview scoring and study progress statistics.

use serde::{Deserialize, Serialize};

use crate::model::{InterviewResult, Question, QuestionBank, Status};

/// Mean score over all results, rounded to one decimal place.
///
/// Placeholder zeros count like any other score. An empty set averages to 0.
pub fn average_score(results: &[InterviewResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: f64 = results.iter().map(|r| r.feedback.score).sum();
    round_to_tenth(total / results.len() as f64)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Coarse rating of an average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

/// Classify an average score: 7 and up is good, 4 and up is fair.
pub fn score_band(average: f64) -> ScoreBand {
    if average >= 7.0 {
        ScoreBand::Good
    } else if average >= 4.0 {
        ScoreBand::Fair
    } else {
        ScoreBand::Poor
    }
}

/// Overall study progress across the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub learned: usize,
    pub needs_review: usize,
    pub important: usize,
    /// Learned share of the catalog, rounded to a whole percent.
    pub percent_learned: u32,
}

/// Study progress for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub title: String,
    pub total: usize,
    pub learned: usize,
    /// Learned share of the category, rounded to a whole percent.
    pub progress: u32,
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Count statuses over a set of questions.
pub fn summarize_progress(questions: &[Question]) -> ProgressSummary {
    let count = |status| questions.iter().filter(|q| q.status == status).count();
    let learned = count(Status::Learned);
    ProgressSummary {
        total: questions.len(),
        learned,
        needs_review: count(Status::NeedsReview),
        important: count(Status::Important),
        percent_learned: percent(learned, questions.len()),
    }
}

/// Per-category progress, in the catalog's category order.
pub fn category_stats(bank: &QuestionBank, questions: &[Question]) -> Vec<CategoryStats> {
    bank.categories
        .iter()
        .map(|category| {
            let in_category: Vec<&Question> = questions
                .iter()
                .filter(|q| q.category == category.title)
                .collect();
            let learned = in_category
                .iter()
                .filter(|q| q.status == Status::Learned)
                .count();
            CategoryStats {
                title: category.title.clone(),
                total: in_category.len(),
                learned,
                progress: percent(learned, in_category.len()),
            }
        })
        .collect()
}
