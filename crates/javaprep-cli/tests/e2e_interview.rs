//! End-to-end interview tests wiring the real session, orchestrator and
//! report pipeline to the mock evaluator.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use javaprep_core::engine::{
    is_failure_feedback, InterviewOrchestrator, NoopObserver, OrchestratorConfig,
    FAILURE_STRENGTHS,
};
use javaprep_core::model::{Category, Difficulty, Question, QuestionBank, Status};
use javaprep_core::progress::{FileProgressStore, ProgressTracker};
use javaprep_core::report::InterviewReport;
use javaprep_core::session::{
    sample_questions, InterviewSession, Phase, SessionEvent, NO_ANSWER_SENTINEL,
};
use javaprep_core::statistics::ScoreBand;
use javaprep_providers::mock::MockEvaluator;
use javaprep_providers::{create_evaluator, EvaluatorConfig};
use javaprep_report::html::generate_html;

fn bank(n: u32) -> QuestionBank {
    let questions = (1..=n)
        .map(|id| Question {
            id,
            question: format!("Java question {id}"),
            answer: format!("Reference answer {id}"),
            difficulty: Difficulty::ALL[id as usize % 3],
            category: if id % 2 == 0 { "OOP" } else { "JVM" }.into(),
            status: Status::NotStarted,
        })
        .collect::<Vec<_>>();
    let (oop, jvm): (Vec<_>, Vec<_>) = questions.into_iter().partition(|q| q.category == "OOP");
    QuestionBank {
        id: "e2e".into(),
        name: "E2E Bank".into(),
        description: String::new(),
        categories: vec![
            Category {
                title: "OOP".into(),
                questions: oop,
            },
            Category {
                title: "JVM".into(),
                questions: jvm,
            },
        ],
    }
}

/// Answer every question, leaving one blank and one that makes the evaluator fail.
fn answered_session(bank: &QuestionBank, seed: u64) -> InterviewSession {
    let catalog = bank.questions();
    let questions = sample_questions(&catalog, 10, &mut StdRng::seed_from_u64(seed));
    let ids: Vec<u32> = questions.iter().map(|q| q.id).collect();

    let mut session = InterviewSession::new().transition(SessionEvent::Start { questions });
    for (index, id) in ids.iter().enumerate() {
        session = session.transition(SessionEvent::Navigate { index });
        let text = match index {
            3 => continue,
            6 => "boom".to_string(),
            _ => format!("my answer to {id}"),
        };
        session = session.transition(SessionEvent::Answer {
            question_id: *id,
            text,
        });
    }
    session
}

fn scoring_mock() -> MockEvaluator {
    let mut scores = HashMap::new();
    scores.insert(NO_ANSWER_SENTINEL.to_string(), 1.0);
    MockEvaluator::new(scores)
        .failing_on("boom")
        .delayed_on("my answer", Duration::from_millis(20))
}

#[tokio::test]
async fn full_interview_blank_and_failed_answers() {
    let bank = bank(12);
    let session = answered_session(&bank, 7);
    let order: Vec<u32> = session
        .draft()
        .unwrap()
        .questions()
        .iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(order.len(), 10);

    let mock = Arc::new(scoring_mock().with_default_score(8.0));
    let orchestrator = InterviewOrchestrator::new(mock.clone(), OrchestratorConfig::default());

    let session = orchestrator.run(session, &NoopObserver).await;
    assert_eq!(session.phase(), Phase::Results);
    assert_eq!(mock.call_count(), 10);

    let outcome = session.outcome().unwrap();
    let results = outcome.results();
    assert_eq!(
        results.iter().map(|r| r.question.id).collect::<Vec<_>>(),
        order
    );

    assert_eq!(results[3].user_answer, NO_ANSWER_SENTINEL);
    assert_eq!(results[3].feedback.score, 1.0);

    assert!(is_failure_feedback(&results[6].feedback));
    assert_eq!(results[6].feedback.score, 0.0);
    assert_eq!(results[6].feedback.feedback.strengths, FAILURE_STRENGTHS);

    // 8 answers at 8.0, the blank at 1.0 and the failure at 0.0.
    assert_eq!(outcome.average_score(), 6.5);

    let report = InterviewReport::from_outcome(&bank, orchestrator.evaluator_name(), outcome, 5);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.band, ScoreBand::Fair);
    let html = generate_html(&report);
    assert!(html.contains("6.5"));
    assert!(html.contains("E2E Bank"));
}

#[tokio::test]
async fn small_catalog_uses_every_question() {
    let bank = bank(4);
    let catalog = bank.questions();
    let questions = sample_questions(&catalog, 10, &mut StdRng::seed_from_u64(1));
    assert_eq!(questions.len(), 4);

    let session = InterviewSession::new()
        .transition(SessionEvent::Start { questions })
        .transition(SessionEvent::Navigate { index: 3 });

    let evaluator = create_evaluator(
        &EvaluatorConfig::Mock {
            score: 9.0,
            fail_on: vec![],
        },
        5,
    )
    .unwrap();
    let orchestrator = InterviewOrchestrator::new(Arc::from(evaluator), OrchestratorConfig::default());
    let session = orchestrator.run(session, &NoopObserver).await;

    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.results().len(), 4);
    assert!(outcome
        .results()
        .iter()
        .all(|r| r.user_answer == NO_ANSWER_SENTINEL));
    assert_eq!(outcome.average_score(), 9.0);
}

#[tokio::test(start_paused = true)]
async fn slow_evaluation_times_out_to_placeholder() {
    let bank = bank(2);
    let questions = bank.questions();
    let session = InterviewSession::new()
        .transition(SessionEvent::Start { questions })
        .transition(SessionEvent::Answer {
            question_id: 2,
            text: "slow answer".into(),
        })
        .transition(SessionEvent::Navigate { index: 1 });

    let mock = MockEvaluator::with_fixed_score(7.0).delayed_on("slow", Duration::from_secs(120));
    let orchestrator = InterviewOrchestrator::new(
        Arc::new(mock),
        OrchestratorConfig {
            request_timeout: Some(Duration::from_secs(60)),
        },
    );

    let session = orchestrator.run(session, &NoopObserver).await;
    let outcome = session.outcome().unwrap();
    let by_id: HashMap<u32, f64> = outcome
        .results()
        .iter()
        .map(|r| (r.question.id, r.feedback.score))
        .collect();
    assert_eq!(by_id[&2], 0.0);
    assert_eq!(by_id[&1], 7.0);
    assert_eq!(outcome.average_score(), 3.5);
}

#[tokio::test]
async fn restart_during_evaluation_discards_stale_results() {
    let bank = bank(12);
    let submitted = answered_session(&bank, 3)
        .transition(SessionEvent::Navigate { index: 9 })
        .transition(SessionEvent::Submit);
    assert_eq!(submitted.phase(), Phase::Evaluating);
    let stale_generation = submitted.generation();
    let answers = submitted.submission().unwrap().answers().to_vec();

    let orchestrator = InterviewOrchestrator::new(
        Arc::new(MockEvaluator::with_fixed_score(5.0)),
        OrchestratorConfig::default(),
    );
    let results = orchestrator.evaluate_all(&answers, &NoopObserver).await;

    // The user starts over before the first batch lands.
    let catalog = bank.questions();
    let restarted = submitted.transition(SessionEvent::Start {
        questions: sample_questions(&catalog, 10, &mut StdRng::seed_from_u64(4)),
    });
    let after = restarted.transition(SessionEvent::EvaluationComplete {
        generation: stale_generation,
        results,
    });

    assert_eq!(after.phase(), Phase::InProgress);
    assert!(after.outcome().is_none());
    assert!(after.generation() > stale_generation);
}

#[test]
fn progress_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut tracker = ProgressTracker::load(bank(12), Box::new(FileProgressStore::in_dir(dir.path())));
    tracker.set_status(2, Status::Learned).unwrap();
    tracker.set_status(5, Status::Important).unwrap();
    tracker.set_status(2, Status::NeedsReview).unwrap();

    let reloaded = ProgressTracker::load(bank(12), Box::new(FileProgressStore::in_dir(dir.path())));
    assert_eq!(reloaded.status(2), Some(Status::NeedsReview));
    assert_eq!(reloaded.status(5), Some(Status::Important));
    assert_eq!(reloaded.status(7), Some(Status::NotStarted));
    assert_eq!(reloaded.summary().important, 1);
}
