//! Core data model types for javaprep.
//!
//! These are the fundamental types the whole system uses to represent
//! questions, their learning status, and interview answers and results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique numeric identity of a question within a catalog.
pub type QuestionId = u32;

/// A single interview question from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier.
    pub id: QuestionId,
    /// The prompt shown to the candidate.
    pub question: String,
    /// Reference answer, also shown as the hint.
    pub answer: String,
    /// How hard the question is.
    pub difficulty: Difficulty,
    /// Title of the category this question belongs to.
    #[serde(default)]
    pub category: String,
    /// Learning status. Owned by the progress store, not the catalog.
    #[serde(default)]
    pub status: Status,
}

/// Question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[serde(alias = "Dễ")]
    Easy,
    #[serde(alias = "Trung bình")]
    Medium,
    #[serde(alias = "Khó")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "dễ" => Ok(Difficulty::Easy),
            "medium" | "trung bình" => Ok(Difficulty::Medium),
            "hard" | "khó" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Per-question learning status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    #[serde(alias = "Chưa học")]
    NotStarted,
    #[serde(alias = "Đã học")]
    Learned,
    #[serde(alias = "Cần xem lại")]
    NeedsReview,
    #[serde(alias = "Quan trọng")]
    Important,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::NotStarted,
        Status::Learned,
        Status::NeedsReview,
        Status::Important,
    ];
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NotStarted => write!(f, "not_started"),
            Status::Learned => write!(f, "learned"),
            Status::NeedsReview => write!(f, "needs_review"),
            Status::Important => write!(f, "important"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "not_started" | "new" | "chưa học" => Ok(Status::NotStarted),
            "learned" | "đã học" => Ok(Status::Learned),
            "needs_review" | "review" | "cần xem lại" => Ok(Status::NeedsReview),
            "important" | "quan trọng" => Ok(Status::Important),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// A named group of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// The static question catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Categories in display order.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl QuestionBank {
    /// All questions in catalog order.
    pub fn questions(&self) -> Vec<Question> {
        self.categories
            .iter()
            .flat_map(|c| c.questions.iter().cloned())
            .collect()
    }

    /// Total number of questions across all categories.
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    /// Category titles in catalog order.
    pub fn category_titles(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.title.as_str()).collect()
    }
}

/// A candidate's submitted answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewAnswer {
    pub question: Question,
    pub user_answer: String,
}

/// Feedback text returned by the evaluation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackText {
    pub strengths: String,
    pub improvements: String,
}

/// Structured score and feedback for one answer.
///
/// The score is nominally in `[0, 10]` but is passed through as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiFeedback {
    pub score: f64,
    pub feedback: FeedbackText,
}

/// An answer together with its evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewResult {
    pub question: Question,
    pub user_answer: String,
    pub feedback: AiFeedback,
}

impl InterviewResult {
    pub fn new(answer: InterviewAnswer, feedback: AiFeedback) -> Self {
        Self {
            question: answer.question,
            user_answer: answer.user_answer,
            feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("Dễ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Trung bình".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn status_display_and_parse() {
        for status in Status::ALL {
            assert_eq!(status.to_string().parse::<Status>().unwrap(), status);
        }
        assert_eq!("needs-review".parse::<Status>().unwrap(), Status::NeedsReview);
        assert_eq!("Quan trọng".parse::<Status>().unwrap(), Status::Important);
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn status_accepts_vietnamese_labels_in_json() {
        let status: Status = serde_json::from_str("\"Cần xem lại\"").unwrap();
        assert_eq!(status, Status::NeedsReview);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"needs_review\"");
    }

    #[test]
    fn bank_flattens_questions_in_order() {
        let q = |id| Question {
            id,
            question: format!("Q{id}"),
            answer: String::new(),
            difficulty: Difficulty::Easy,
            category: String::new(),
            status: Status::NotStarted,
        };
        let bank = QuestionBank {
            id: "b".into(),
            name: "B".into(),
            description: String::new(),
            categories: vec![
                Category {
                    title: "One".into(),
                    questions: vec![q(2), q(1)],
                },
                Category {
                    title: "Two".into(),
                    questions: vec![q(3)],
                },
            ],
        };
        let ids: Vec<_> = bank.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(bank.question_count(), 3);
        assert_eq!(bank.category_titles(), vec!["One", "Two"]);
    }
}
