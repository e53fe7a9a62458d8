//! Configuration loading and evaluator factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use javaprep_core::session::INTERVIEW_QUESTION_COUNT;
use javaprep_core::traits::Evaluator;

use crate::gemini::GeminiEvaluator;
use crate::mock::MockEvaluator;

/// Which evaluation service scores interview answers.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EvaluatorConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
    },
    /// Offline evaluator that gives every answer the same score.
    Mock {
        #[serde(default = "default_mock_score")]
        score: f64,
        /// Answers containing any of these substrings fail.
        #[serde(default)]
        fail_on: Vec<String>,
    },
}

impl std::fmt::Debug for EvaluatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluatorConfig::Gemini {
                api_key: _,
                base_url,
                model,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            EvaluatorConfig::Mock { score, fail_on } => f
                .debug_struct("Mock")
                .field("score", score)
                .field("fail_on", fail_on)
                .finish(),
        }
    }
}

fn default_mock_score() -> f64 {
    5.0
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig::Gemini {
            api_key: "${GEMINI_API_KEY}".to_string(),
            base_url: None,
            model: None,
        }
    }
}

/// Top-level javaprep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaprepConfig {
    /// Evaluation service.
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    /// Questions per interview.
    #[serde(default = "default_interview_size")]
    pub interview_size: usize,
    /// Per-answer evaluation timeout.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Where progress is stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Default question bank file or directory.
    #[serde(default)]
    pub question_bank: Option<PathBuf>,
}

fn default_interview_size() -> usize {
    INTERVIEW_QUESTION_COUNT
}
fn default_timeout() -> u64 {
    60
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./.javaprep")
}

impl Default for JavaprepConfig {
    fn default() -> Self {
        Self {
            evaluator: EvaluatorConfig::default(),
            interview_size: default_interview_size(),
            request_timeout_secs: default_timeout(),
            data_dir: default_data_dir(),
            question_bank: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        // Substituted text is never expanded again.
        from = start + value.len();
    }
    result
}

/// Resolve env vars in an evaluator config.
fn resolve_evaluator_config(config: &EvaluatorConfig) -> EvaluatorConfig {
    match config {
        EvaluatorConfig::Gemini {
            api_key,
            base_url,
            model,
        } => EvaluatorConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            model: model.as_ref().map(|m| resolve_env_vars(m)),
        },
        mock @ EvaluatorConfig::Mock { .. } => mock.clone(),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `javaprep.toml` in the current directory
/// 2. `~/.config/javaprep/config.toml`
///
/// Environment variable override: `JAVAPREP_GEMINI_KEY`.
pub fn load_config() -> Result<JavaprepConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<JavaprepConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("javaprep.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<JavaprepConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => JavaprepConfig::default(),
    };

    // Apply env var override
    if let Ok(key) = std::env::var("JAVAPREP_GEMINI_KEY") {
        match &mut config.evaluator {
            EvaluatorConfig::Gemini { api_key, .. } => *api_key = key,
            EvaluatorConfig::Mock { .. } => {
                tracing::debug!("JAVAPREP_GEMINI_KEY ignored, mock evaluator configured")
            }
        }
    }

    config.evaluator = resolve_evaluator_config(&config.evaluator);
    anyhow::ensure!(
        config.interview_size >= 1,
        "interview_size must be at least 1"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("javaprep"))
}

/// Create an evaluator from its configuration.
pub fn create_evaluator(
    config: &EvaluatorConfig,
    timeout_secs: u64,
) -> Result<Box<dyn Evaluator>> {
    match config {
        EvaluatorConfig::Gemini {
            api_key,
            base_url,
            model,
        } => {
            anyhow::ensure!(
                !api_key.trim().is_empty(),
                "no Gemini API key configured; set GEMINI_API_KEY or JAVAPREP_GEMINI_KEY"
            );
            Ok(Box::new(
                GeminiEvaluator::new(api_key, base_url.clone(), model.clone())
                    .with_timeout(timeout_secs),
            ))
        }
        EvaluatorConfig::Mock { score, fail_on } => {
            let mock = fail_on
                .iter()
                .fold(MockEvaluator::with_fixed_score(*score), |m, needle| {
                    m.failing_on(needle)
                });
            Ok(Box::new(mock))
        }
    }
}
