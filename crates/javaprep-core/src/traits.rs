//! Core trait definitions for answer evaluators.
//!
//! The async `Evaluator` trait is implemented by the `javaprep-providers`
//! crate. The progress store trait lives in [`crate::progress`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{AiFeedback, InterviewAnswer};

// ---------------------------------------------------------------------------
// Evaluator trait
// ---------------------------------------------------------------------------

/// Trait for AI backends that score a candidate's answer.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Human-readable evaluator name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Score one answer. Exactly one attempt; the caller handles failure.
    async fn evaluate(&self, request: &EvaluationRequest) -> anyhow::Result<AiFeedback>;
}

/// What an evaluator needs to score one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// The interview question.
    pub question_text: String,
    /// Suggested answer / key points.
    pub reference_answer: String,
    /// What the candidate wrote.
    pub candidate_answer: String,
}

impl From<&InterviewAnswer> for EvaluationRequest {
    fn from(answer: &InterviewAnswer) -> Self {
        Self {
            question_text: answer.question.question.clone(),
            reference_answer: answer.question.answer.clone(),
            candidate_answer: answer.user_answer.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// Build the grading prompt sent to an LLM-backed evaluator.
pub fn build_evaluation_prompt(request: &EvaluationRequest) -> String {
    format!(
        r#"You are a world-class senior Java engineer conducting a technical interview. Your task is to evaluate a candidate's answer to a specific interview question.

Here is the information you'll use:
- **Interview Question:** "{question}"
- **Suggested Answer / Key Points:** "{reference}"
- **Candidate's Answer:** "{candidate}"

Please perform the following steps:
1. **Analyze:** Compare the candidate's answer to the suggested answer and your expert knowledge. Assess its technical accuracy, completeness, and clarity.
2. **Score:** Provide a score from 1 to 10, where 1 is completely wrong and 10 is a perfect, comprehensive answer.
3. **Feedback:** Write constructive feedback in Vietnamese. First, point out what the candidate got right ('Điểm mạnh'). Then, clearly explain any inaccuracies, omissions, or areas for improvement ('Góp ý cải thiện'). Provide a corrected or more ideal version of the answer if necessary.

Your response must be a JSON object of the form {{"score": number, "feedback": {{"strengths": string, "improvements": string}}}}. Do not include any text outside of the JSON object."#,
        question = request.question_text,
        reference = request.reference_answer,
        candidate = request.candidate_answer,
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Strip a surrounding markdown code fence (```json ... ```) if present.
///
/// Models asked for JSON sometimes wrap it anyway; raw text is returned trimmed.
pub fn extract_json_block(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag on the opening fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => return trimmed,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse evaluator output into structured feedback.
pub fn parse_feedback(response: &str) -> serde_json::Result<AiFeedback> {
    serde_json::from_str(extract_json_block(response))
}
