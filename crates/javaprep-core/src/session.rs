//! Interview session state machine.
//!
//! A session moves `NotStarted -> InProgress -> Evaluating -> Results`.
//! Every change goes through [`InterviewSession::transition`], a pure function
//! from the current session and an event to the next session. Events that do
//! not apply to the current phase leave the session untouched.
//!
//! Each `Start` bumps a generation counter. Evaluation results carry the
//! generation they were produced for, so results from a superseded session
//! are dropped instead of overwriting the new one.

use std::collections::{BTreeSet, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::failure_feedback;
use crate::model::{InterviewAnswer, InterviewResult, Question, QuestionId};
use crate::statistics::average_score;

/// Number of questions asked per interview.
pub const INTERVIEW_QUESTION_COUNT: usize = 10;

/// Answer text submitted for a question the candidate left blank.
pub const NO_ANSWER_SENTINEL: &str = "Không có câu trả lời.";

/// Pick `size` questions uniformly at random, without replacement, in random order.
///
/// A catalog smaller than `size` yields every question, shuffled.
pub fn sample_questions<R: Rng + ?Sized>(
    catalog: &[Question],
    size: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = catalog.to_vec();
    pool.shuffle(rng);
    pool.truncate(size.min(catalog.len()));
    pool
}

/// Something that happens to a session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Begin a fresh interview over the given questions.
    Start { questions: Vec<Question> },
    /// Replace the answer text for a question.
    Answer { question_id: QuestionId, text: String },
    /// Move to another question.
    Navigate { index: usize },
    /// Show or hide the reference answer of a question.
    ToggleHint { question_id: QuestionId },
    /// Freeze the answers and hand them off for evaluation.
    Submit,
    /// Evaluation finished for the given generation.
    EvaluationComplete {
        generation: u64,
        results: Vec<InterviewResult>,
    },
}

/// Answers being collected.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    questions: Vec<Question>,
    answers: HashMap<QuestionId, String>,
    hints_revealed: BTreeSet<QuestionId>,
    current_index: usize,
    hint_visible: bool,
}

impl Draft {
    fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: HashMap::new(),
            hints_revealed: BTreeSet::new(),
            current_index: 0,
            hint_visible: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Answer text for a question; empty if never answered.
    pub fn answer(&self, question_id: QuestionId) -> &str {
        self.answers
            .get(&question_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn hint_revealed(&self, question_id: QuestionId) -> bool {
        self.hints_revealed.contains(&question_id)
    }

    pub fn hints_revealed(&self) -> &BTreeSet<QuestionId> {
        &self.hints_revealed
    }

    /// Whether the current question is the last one, which is where submit is allowed.
    pub fn on_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    fn contains(&self, question_id: QuestionId) -> bool {
        self.questions.iter().any(|q| q.id == question_id)
    }

    fn freeze(self) -> Submission {
        let answers = self
            .questions
            .into_iter()
            .map(|question| {
                let user_answer = match self.answers.get(&question.id) {
                    Some(text) if !text.is_empty() => text.clone(),
                    _ => NO_ANSWER_SENTINEL.to_string(),
                };
                InterviewAnswer {
                    question,
                    user_answer,
                }
            })
            .collect();
        Submission {
            answers,
            hints_revealed: self.hints_revealed,
        }
    }
}

/// Frozen answers awaiting evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    answers: Vec<InterviewAnswer>,
    hints_revealed: BTreeSet<QuestionId>,
}

impl Submission {
    /// Answers in interview order.
    pub fn answers(&self) -> &[InterviewAnswer] {
        &self.answers
    }

    pub fn hints_revealed(&self) -> &BTreeSet<QuestionId> {
        &self.hints_revealed
    }

    /// One result per submitted answer, in submission order.
    ///
    /// Results for unknown questions are dropped; answers without a result
    /// get the failure placeholder.
    fn reconcile(&self, results: Vec<InterviewResult>) -> Vec<InterviewResult> {
        let mut by_id: HashMap<QuestionId, InterviewResult> = HashMap::new();
        for result in results {
            by_id.entry(result.question.id).or_insert(result);
        }
        let reconciled: Vec<_> = self
            .answers
            .iter()
            .map(|answer| {
                by_id.remove(&answer.question.id).unwrap_or_else(|| {
                    tracing::warn!(
                        question_id = answer.question.id,
                        "no evaluation result, using placeholder"
                    );
                    InterviewResult::new(answer.clone(), failure_feedback())
                })
            })
            .collect();
        if !by_id.is_empty() {
            tracing::warn!(
                extra = by_id.len(),
                "dropping results for questions outside the interview"
            );
        }
        reconciled
    }
}

/// The evaluated interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    results: Vec<InterviewResult>,
    hints_revealed: BTreeSet<QuestionId>,
    average_score: f64,
}

impl Outcome {
    fn new(results: Vec<InterviewResult>, hints_revealed: BTreeSet<QuestionId>) -> Self {
        let average_score = average_score(&results);
        Self {
            results,
            hints_revealed,
            average_score,
        }
    }

    /// Results in interview order.
    pub fn results(&self) -> &[InterviewResult] {
        &self.results
    }

    pub fn hint_revealed(&self, question_id: QuestionId) -> bool {
        self.hints_revealed.contains(&question_id)
    }

    pub fn hints_revealed(&self) -> &BTreeSet<QuestionId> {
        &self.hints_revealed
    }

    /// Mean score rounded to one decimal place.
    pub fn average_score(&self) -> f64 {
        self.average_score
    }
}

/// Lifecycle phase plus the data that phase owns.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress(Draft),
    Evaluating(Submission),
    Results(Outcome),
}

/// Short name of a phase, for logs and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Evaluating,
    Results,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::NotStarted => Phase::NotStarted,
            SessionState::InProgress(_) => Phase::InProgress,
            SessionState::Evaluating(_) => Phase::Evaluating,
            SessionState::Results(_) => Phase::Results,
        }
    }
}

/// One simulated interview.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterviewSession {
    generation: u64,
    state: SessionState,
}

impl InterviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incremented on every `Start`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            SessionState::InProgress(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn submission(&self) -> Option<&Submission> {
        match &self.state {
            SessionState::Evaluating(submission) => Some(submission),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            SessionState::Results(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Apply an event and return the resulting session.
    pub fn transition(self, event: SessionEvent) -> Self {
        let generation = self.generation;
        match (self.state, event) {
            (_, SessionEvent::Start { questions }) => {
                tracing::debug!(
                    generation = generation + 1,
                    count = questions.len(),
                    "interview started"
                );
                Self {
                    generation: generation + 1,
                    state: SessionState::InProgress(Draft::new(questions)),
                }
            }

            (SessionState::InProgress(mut draft), SessionEvent::Answer { question_id, text }) => {
                if draft.contains(question_id) {
                    draft.answers.insert(question_id, text);
                }
                Self::in_progress(generation, draft)
            }

            (SessionState::InProgress(mut draft), SessionEvent::Navigate { index }) => {
                if index < draft.questions.len() {
                    draft.current_index = index;
                    draft.hint_visible = false;
                }
                Self::in_progress(generation, draft)
            }

            (SessionState::InProgress(mut draft), SessionEvent::ToggleHint { question_id }) => {
                if draft.current_question().map(|q| q.id) == Some(question_id) {
                    if !draft.hint_visible {
                        draft.hints_revealed.insert(question_id);
                    }
                    draft.hint_visible = !draft.hint_visible;
                }
                Self::in_progress(generation, draft)
            }

            (SessionState::InProgress(draft), SessionEvent::Submit) => {
                if !draft.on_last_question() {
                    return Self::in_progress(generation, draft);
                }
                tracing::debug!(generation, "interview submitted");
                Self {
                    generation,
                    state: SessionState::Evaluating(draft.freeze()),
                }
            }

            (
                SessionState::Evaluating(submission),
                SessionEvent::EvaluationComplete {
                    generation: result_generation,
                    results,
                },
            ) => {
                if result_generation != generation {
                    tracing::warn!(
                        current = generation,
                        stale = result_generation,
                        "ignoring results from a superseded interview"
                    );
                    return Self {
                        generation,
                        state: SessionState::Evaluating(submission),
                    };
                }
                let results = submission.reconcile(results);
                Self {
                    generation,
                    state: SessionState::Results(Outcome::new(
                        results,
                        submission.hints_revealed,
                    )),
                }
            }

            (state, event) => {
                tracing::debug!(phase = ?state.phase(), ?event, "event ignored in this phase");
                Self { generation, state }
            }
        }
    }

    fn in_progress(generation: u64, draft: Draft) -> Self {
        Self {
            generation,
            state: SessionState::InProgress(draft),
        }
    }
}
