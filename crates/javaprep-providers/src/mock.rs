//! Mock evaluator for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use javaprep_core::model::{AiFeedback, FeedbackText};
use javaprep_core::traits::{EvaluationRequest, Evaluator};

use crate::error::ProviderError;

/// A mock evaluator for exercising interviews without real API calls.
///
/// Rules match on substrings of the candidate's answer; the first matching
/// failure rule wins over any score rule.
pub struct MockEvaluator {
    /// Map of answer substring → score.
    scores: HashMap<String, f64>,
    /// Answer substrings that make the call fail.
    failures: Vec<String>,
    /// Answer substring → artificial latency.
    delays: HashMap<String, Duration>,
    /// Score when no rule matches.
    default_score: f64,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Every request received, in arrival order.
    requests: Mutex<Vec<EvaluationRequest>>,
}

impl MockEvaluator {
    /// Create a mock with the given answer→score mappings.
    pub fn new(scores: HashMap<String, f64>) -> Self {
        Self {
            scores,
            failures: Vec::new(),
            delays: HashMap::new(),
            default_score: 5.0,
            call_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always returns the same score.
    pub fn with_fixed_score(score: f64) -> Self {
        Self::new(HashMap::new()).with_default_score(score)
    }

    /// Score used when no rule matches.
    pub fn with_default_score(mut self, score: f64) -> Self {
        self.default_score = score;
        self
    }

    /// Fail every call whose answer contains `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.failures.push(needle.to_string());
        self
    }

    /// Sleep before answering calls whose answer contains `needle`.
    pub fn delayed_on(mut self, needle: &str, delay: Duration) -> Self {
        self.delays.insert(needle.to_string(), delay);
        self
    }

    /// Get the number of calls made to this evaluator.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<EvaluationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Evaluator for MockEvaluator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn evaluate(&self, request: &EvaluationRequest) -> anyhow::Result<AiFeedback> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.requests.lock().unwrap().push(request.clone());

        let answer = request.candidate_answer.as_str();

        if let Some(delay) = self
            .delays
            .iter()
            .find(|(needle, _)| answer.contains(needle.as_str()))
            .map(|(_, d)| *d)
        {
            tokio::time::sleep(delay).await;
        }

        if self.failures.iter().any(|needle| answer.contains(needle)) {
            return Err(ProviderError::NetworkError("simulated failure".into()).into());
        }

        let score = self
            .scores
            .iter()
            .find(|(needle, _)| answer.contains(needle.as_str()))
            .map(|(_, score)| *score)
            .unwrap_or(self.default_score);

        Ok(AiFeedback {
            score,
            feedback: FeedbackText {
                strengths: format!("Mock review of: {}", request.question_text),
                improvements: "Add a concrete example.".to_string(),
            },
        })
    }
}
