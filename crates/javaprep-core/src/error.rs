//! Domain error types for the core crate.

use thiserror::Error;

use crate::model::QuestionId;

/// Errors raised while loading a question catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two questions share the same id.
    #[error("duplicate question id {id} (in category '{category}')")]
    DuplicateId { id: QuestionId, category: String },

    /// A difficulty value could not be recognised.
    #[error("question {id}: {message}")]
    InvalidDifficulty { id: QuestionId, message: String },
}

/// Errors raised by the progress tracker and its stores.
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The question id is not part of the loaded catalog.
    #[error("unknown question id: {0}")]
    UnknownQuestion(QuestionId),

    /// The stored progress blob could not be decoded.
    #[error("corrupt progress data: {0}")]
    Corrupt(String),
}
