//! Interview evaluation orchestrator.
//!
//! Turns a submitted interview into results by scoring every answer
//! concurrently, one evaluator call per answer, and waiting for all of them.
//! A failed call never fails the interview: it is replaced by a fixed
//! zero-score placeholder.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};

use crate::model::{AiFeedback, FeedbackText, InterviewAnswer, InterviewResult, QuestionId};
use crate::session::{InterviewSession, SessionEvent};
use crate::traits::{EvaluationRequest, Evaluator};

/// Strengths text used when evaluation fails.
pub const FAILURE_STRENGTHS: &str = "Không thể nhận được phản hồi từ AI.";

/// Improvements text used when evaluation fails.
pub const FAILURE_IMPROVEMENTS: &str = "Đã xảy ra lỗi khi xử lý câu trả lời của bạn. Vui lòng thử lại. Lỗi có thể do chính sách an toàn của API.";

/// The zero-score feedback substituted for a failed evaluation.
pub fn failure_feedback() -> AiFeedback {
    AiFeedback {
        score: 0.0,
        feedback: FeedbackText {
            strengths: FAILURE_STRENGTHS.to_string(),
            improvements: FAILURE_IMPROVEMENTS.to_string(),
        },
    }
}

/// Whether feedback is the failure placeholder.
pub fn is_failure_feedback(feedback: &AiFeedback) -> bool {
    *feedback == failure_feedback()
}

/// Configuration for the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Per-call limit; a call that runs longer counts as failed.
    pub request_timeout: Option<Duration>,
}

/// Progress reporting trait.
pub trait EvaluationObserver: Send + Sync {
    fn on_evaluation_start(&self, question_id: QuestionId);
    fn on_evaluation_complete(&self, result: &InterviewResult);
    fn on_evaluation_failed(&self, question_id: QuestionId, error: &str);
    fn on_all_complete(&self, total: usize, failed: usize, elapsed: Duration);
}

/// No-op observer.
pub struct NoopObserver;

impl EvaluationObserver for NoopObserver {
    fn on_evaluation_start(&self, _: QuestionId) {}
    fn on_evaluation_complete(&self, _: &InterviewResult) {}
    fn on_evaluation_failed(&self, _: QuestionId, _: &str) {}
    fn on_all_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Drives a session through evaluation.
pub struct InterviewOrchestrator {
    evaluator: Arc<dyn Evaluator>,
    config: OrchestratorConfig,
}

impl InterviewOrchestrator {
    pub fn new(evaluator: Arc<dyn Evaluator>, config: OrchestratorConfig) -> Self {
        Self { evaluator, config }
    }

    pub fn evaluator_name(&self) -> &str {
        self.evaluator.name()
    }

    /// Score every answer concurrently and return results in input order.
    ///
    /// Always yields exactly one result per answer.
    pub async fn evaluate_all(
        &self,
        answers: &[InterviewAnswer],
        observer: &dyn EvaluationObserver,
    ) -> Vec<InterviewResult> {
        let start = Instant::now();
        let mut futures = FuturesUnordered::new();

        for (index, answer) in answers.iter().enumerate() {
            let evaluator = Arc::clone(&self.evaluator);
            let timeout = self.config.request_timeout;
            let request = EvaluationRequest::from(answer);
            let question_id = answer.question.id;
            observer.on_evaluation_start(question_id);

            futures.push(async move {
                let call = evaluator.evaluate(&request);
                let outcome = match timeout {
                    Some(limit) => match tokio::time::timeout(limit, call).await {
                        Ok(result) => result,
                        Err(_) => Err(anyhow::anyhow!(
                            "evaluation timed out after {}s",
                            limit.as_secs_f64()
                        )),
                    },
                    None => call.await,
                };
                (index, question_id, outcome)
            });
        }

        let total = futures.len();
        let mut slots: Vec<Option<InterviewResult>> = vec![None; total];
        let mut failed = 0usize;

        while let Some((index, question_id, outcome)) = futures.next().await {
            let feedback = match outcome {
                Ok(feedback) => feedback,
                Err(e) => {
                    tracing::warn!("evaluation failed for question {question_id}: {e:#}");
                    observer.on_evaluation_failed(question_id, &format!("{e:#}"));
                    failed += 1;
                    failure_feedback()
                }
            };
            let result = InterviewResult::new(answers[index].clone(), feedback);
            observer.on_evaluation_complete(&result);
            slots[index] = Some(result);
        }

        observer.on_all_complete(total, failed, start.elapsed());

        slots
            .into_iter()
            .zip(answers)
            .map(|(slot, answer)| {
                slot.unwrap_or_else(|| InterviewResult::new(answer.clone(), failure_feedback()))
            })
            .collect()
    }

    /// Submit the session, evaluate its answers, and deliver the results.
    ///
    /// A session that cannot be submitted (not on its last question, or not
    /// in progress) is returned unchanged.
    pub async fn run(
        &self,
        session: InterviewSession,
        observer: &dyn EvaluationObserver,
    ) -> InterviewSession {
        let session = session.transition(SessionEvent::Submit);
        let Some(submission) = session.submission() else {
            return session;
        };

        let generation = session.generation();
        let results = self.evaluate_all(submission.answers(), observer).await;
        session.transition(SessionEvent::EvaluationComplete {
            generation,
            results,
        })
    }
}
