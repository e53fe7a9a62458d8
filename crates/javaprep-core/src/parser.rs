//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::{Category, Difficulty, Question, QuestionBank, QuestionId, Status};

/// Intermediate TOML structure for parsing question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    categories: Vec<TomlCategory>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlCategory {
    title: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: QuestionId,
    question: String,
    #[serde(default)]
    answer: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

/// Parse a question bank from a TOML file.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;
    parse_question_bank_str(&content)
        .with_context(|| format!("failed to parse question bank: {}", path.display()))
}

/// Parse a question bank from a TOML string.
pub fn parse_question_bank_str(content: &str) -> Result<QuestionBank> {
    let file: TomlBankFile = toml::from_str(content).context("invalid TOML")?;

    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(file.categories.len());

    for toml_category in file.categories {
        let mut questions = Vec::with_capacity(toml_category.questions.len());
        for q in toml_category.questions {
            if !seen.insert(q.id) {
                return Err(CatalogError::DuplicateId {
                    id: q.id,
                    category: toml_category.title.clone(),
                }
                .into());
            }
            let difficulty = q
                .difficulty
                .parse::<Difficulty>()
                .map_err(|message| CatalogError::InvalidDifficulty { id: q.id, message })?;
            questions.push(Question {
                id: q.id,
                question: q.question,
                answer: q.answer,
                difficulty,
                category: toml_category.title.clone(),
                status: Status::NotStarted,
            });
        }
        categories.push(Category {
            title: toml_category.title,
            questions,
        });
    }

    Ok(QuestionBank {
        id: file.bank.id,
        name: file.bank.name,
        description: file.bank.description,
        categories,
    })
}

/// Load all `*.toml` question banks in a directory, sorted by file name.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    paths.iter().map(|p| parse_question_bank(p)).collect()
}

/// Load a single bank file, or merge every bank in a directory into one.
pub fn load_bank(path: &Path) -> Result<QuestionBank> {
    if !path.is_dir() {
        return parse_question_bank(path);
    }

    let banks = load_bank_directory(path)?;
    let mut seen = HashSet::new();
    let mut merged = QuestionBank {
        id: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "merged".to_string()),
        name: banks
            .iter()
            .map(|b| b.name.as_str())
            .collect::<Vec<_>>()
            .join(" + "),
        description: String::new(),
        categories: Vec::new(),
    };
    for bank in banks {
        for category in bank.categories {
            for q in &category.questions {
                if !seen.insert(q.id) {
                    return Err(CatalogError::DuplicateId {
                        id: q.id,
                        category: category.title.clone(),
                    }
                    .into());
                }
            }
            merged.categories.push(category);
        }
    }
    Ok(merged)
}

/// A non-fatal problem found in a question bank.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question the warning refers to, if any.
    pub question_id: Option<QuestionId>,
    pub message: String,
}

/// Validate a parsed question bank against an interview size.
pub fn validate_question_bank(bank: &QuestionBank, interview_size: usize) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.categories.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "question bank has no categories".into(),
        });
    }

    for category in &bank.categories {
        if category.questions.is_empty() {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("category '{}' has no questions", category.title),
            });
        }
        for q in &category.questions {
            if q.question.trim().is_empty() {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id),
                    message: "empty question prompt".into(),
                });
            }
            if q.answer.trim().is_empty() {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id),
                    message: "no reference answer".into(),
                });
            }
        }
    }

    let total = bank.question_count();
    if total < interview_size {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "only {total} questions, interviews will use fewer than {interview_size}"
            ),
        });
    }

    warnings
}
