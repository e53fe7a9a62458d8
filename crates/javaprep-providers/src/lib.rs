//! javaprep-providers: AI answer evaluators.
//!
//! Implements the `Evaluator` trait for Google Gemini and a scriptable mock,
//! and loads the configuration that picks between them.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;

pub use config::{create_evaluator, load_config, load_config_from, EvaluatorConfig, JavaprepConfig};
pub use error::ProviderError;
