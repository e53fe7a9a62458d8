//! javaprep-core: Question catalog, interview sessions, and study progress.
//!
//! This crate defines the data model, the interview state machine and its
//! evaluation orchestrator, and the progress persistence contract that the
//! rest of javaprep builds on.

pub mod engine;
pub mod error;
pub mod flashcard;
pub mod model;
pub mod parser;
pub mod progress;
pub mod report;
pub mod session;
pub mod statistics;
pub mod study;
pub mod traits;
