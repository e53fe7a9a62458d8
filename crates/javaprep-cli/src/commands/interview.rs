//! The `javaprep interview` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use javaprep_core::engine::{EvaluationObserver, InterviewOrchestrator, OrchestratorConfig};
use javaprep_core::model::{InterviewResult, QuestionId};
use javaprep_core::report::InterviewReport;
use javaprep_core::session::{sample_questions, InterviewSession, Outcome, SessionEvent};
use javaprep_core::statistics::score_band;
use javaprep_providers::create_evaluator;
use javaprep_report::html::write_html_report;

use super::{make_rng, truncate, Workspace};

/// Console progress reporter.
struct ConsoleObserver;

impl EvaluationObserver for ConsoleObserver {
    fn on_evaluation_start(&self, question_id: QuestionId) {
        eprintln!("  Evaluating: question {question_id}");
    }

    fn on_evaluation_complete(&self, result: &InterviewResult) {
        eprintln!(
            "  Done: question {} scored {:.1}",
            result.question.id, result.feedback.score
        );
    }

    fn on_evaluation_failed(&self, question_id: QuestionId, error: &str) {
        eprintln!("  ERROR: question {question_id}: {error}");
    }

    fn on_all_complete(&self, total: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {}/{total} evaluated, {failed} failed ({:.1}s)",
            total - failed,
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    config_path: Option<PathBuf>,
    bank: Option<PathBuf>,
    count: Option<usize>,
    output: Option<PathBuf>,
    format: String,
    seed: Option<u64>,
) -> Result<()> {
    let workspace = Workspace::open(config_path.as_deref(), bank)?;
    let config = &workspace.config;

    let size = count.unwrap_or(config.interview_size);
    anyhow::ensure!(size >= 1, "--count must be at least 1");

    let catalog = workspace.bank.questions();
    anyhow::ensure!(!catalog.is_empty(), "question bank has no questions");

    let evaluator = create_evaluator(&config.evaluator, config.request_timeout_secs)?;
    let orchestrator = InterviewOrchestrator::new(
        Arc::from(evaluator),
        OrchestratorConfig {
            request_timeout: Some(Duration::from_secs(config.request_timeout_secs)),
        },
    );

    println!("javaprep v{}", env!("CARGO_PKG_VERSION"));
    println!("Type your answer. Commands: :next :prev :goto N :hint :clear :submit :quit");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut stdout = std::io::stdout();
    let mut rng = make_rng(seed);
    let mut session = InterviewSession::new();
    let mut round = 1;

    loop {
        let questions = sample_questions(&catalog, size, &mut rng);
        println!(
            "\nInterview {round}: {} questions from {}",
            questions.len(),
            workspace.bank.name
        );
        session = session.transition(SessionEvent::Start { questions });
        let Some(submitted) = drive(session, &mut input, &mut stdout)? else {
            println!("Interview abandoned.");
            return Ok(());
        };

        eprintln!(
            "\nSubmitting answers to {}...",
            orchestrator.evaluator_name()
        );
        let start = Instant::now();
        session = orchestrator.run(submitted, &ConsoleObserver).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        let outcome = session
            .outcome()
            .context("interview did not reach the results phase")?;

        print_results(outcome);

        if let Some(output) = &output {
            let report = InterviewReport::from_outcome(
                &workspace.bank,
                orchestrator.evaluator_name(),
                outcome,
                elapsed_ms,
            );
            save_reports(&report, output, &format)?;
        }

        if !ask_again(&mut input, &mut stdout)? {
            break;
        }
        round += 1;
        tracing::info!(round, "starting another interview");
    }

    Ok(())
}

/// Ask whether to run another interview. End of input counts as no.
fn ask_again<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "\nStart another interview? [y/N] ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read input")? == 0 {
        return Ok(false);
    }
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// One line of interview input.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Text(&'a str),
    Next,
    Prev,
    /// 1-based question number.
    Goto(usize),
    Hint,
    Clear,
    Submit,
    Quit,
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with(':') {
            return Input::Text(line);
        }
        let mut parts = trimmed.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(":next" | ":n"), None) => Input::Next,
            (Some(":prev" | ":p"), None) => Input::Prev,
            (Some(":hint" | ":h"), None) => Input::Hint,
            (Some(":clear"), None) => Input::Clear,
            (Some(":submit" | ":s"), None) => Input::Submit,
            (Some(":quit" | ":q"), None) => Input::Quit,
            (Some(":goto" | ":g"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Input::Goto(n),
                _ => Input::Unknown(trimmed),
            },
            _ => Input::Unknown(trimmed),
        }
    }
}

/// Feed input lines to an in-progress session until it is ready to submit.
///
/// Returns `None` when the user quits. End of input submits whatever has
/// been answered so far.
fn drive<R: BufRead, W: Write>(
    mut session: InterviewSession,
    input: R,
    out: &mut W,
) -> Result<Option<InterviewSession>> {
    show_question(&session, out)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let Some(draft) = session.draft() else {
            break;
        };
        let count = draft.questions().len();
        let index = draft.current_index();
        let current = draft.current_question().map(|q| q.id);

        match Input::parse(&line) {
            Input::Text(text) => {
                let Some(id) = current else { continue };
                let existing = draft.answer(id);
                if existing.is_empty() && text.trim().is_empty() {
                    continue;
                }
                let text = if existing.is_empty() {
                    text.to_string()
                } else {
                    format!("{existing}\n{text}")
                };
                session = session.transition(SessionEvent::Answer {
                    question_id: id,
                    text,
                });
            }
            Input::Next => {
                if index + 1 < count {
                    session = session.transition(SessionEvent::Navigate { index: index + 1 });
                    show_question(&session, out)?;
                } else {
                    writeln!(out, "This is the last question. Type :submit to finish.")?;
                }
            }
            Input::Prev => {
                if index > 0 {
                    session = session.transition(SessionEvent::Navigate { index: index - 1 });
                    show_question(&session, out)?;
                } else {
                    writeln!(out, "Already at the first question.")?;
                }
            }
            Input::Goto(n) => {
                if n <= count {
                    session = session.transition(SessionEvent::Navigate { index: n - 1 });
                    show_question(&session, out)?;
                } else {
                    writeln!(out, "No question {n}; this interview has {count}.")?;
                }
            }
            Input::Hint => {
                let Some(id) = current else { continue };
                session = session.transition(SessionEvent::ToggleHint { question_id: id });
                show_hint(&session, out)?;
            }
            Input::Clear => {
                let Some(id) = current else { continue };
                session = session.transition(SessionEvent::Answer {
                    question_id: id,
                    text: String::new(),
                });
                writeln!(out, "Answer cleared.")?;
            }
            Input::Submit => {
                if session.draft().is_some_and(|d| d.on_last_question()) {
                    return Ok(Some(session));
                }
                writeln!(
                    out,
                    "Submit is available on the last question. Use :goto {count}."
                )?;
            }
            Input::Quit => return Ok(None),
            Input::Unknown(cmd) => {
                writeln!(out, "Unknown command: {cmd}")?;
            }
        }
    }

    if let Some(last) = session
        .draft()
        .map(|d| d.questions().len().saturating_sub(1))
    {
        session = session.transition(SessionEvent::Navigate { index: last });
    }
    Ok(Some(session))
}

fn show_question<W: Write>(session: &InterviewSession, out: &mut W) -> Result<()> {
    let Some(draft) = session.draft() else {
        return Ok(());
    };
    let Some(question) = draft.current_question() else {
        writeln!(out, "No questions in this interview. Type :submit to finish.")?;
        return Ok(());
    };
    writeln!(
        out,
        "\n[{}/{}] {} ({})",
        draft.current_index() + 1,
        draft.questions().len(),
        question.category,
        question.difficulty
    )?;
    writeln!(out, "{}", question.question)?;
    let answer = draft.answer(question.id);
    if !answer.is_empty() {
        writeln!(out, "Your answer so far:\n{answer}")?;
    }
    Ok(())
}

fn show_hint<W: Write>(session: &InterviewSession, out: &mut W) -> Result<()> {
    let Some(draft) = session.draft() else {
        return Ok(());
    };
    match draft.current_question() {
        Some(question) if draft.hint_visible() => {
            writeln!(out, "Reference answer:\n{}", question.answer.trim())?;
        }
        Some(_) => writeln!(out, "Hint hidden.")?,
        None => {}
    }
    Ok(())
}

fn print_results(outcome: &Outcome) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Question",
        "Score",
        "Strengths",
        "Improvements",
        "Hint",
    ]);

    for (i, r) in outcome.results().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(truncate(&r.question.question, 50)),
            Cell::new(format!("{:.1}", r.feedback.score)),
            Cell::new(truncate(&r.feedback.feedback.strengths, 60)),
            Cell::new(truncate(&r.feedback.feedback.improvements, 60)),
            Cell::new(if outcome.hint_revealed(r.question.id) {
                "yes"
            } else {
                ""
            }),
        ]);
    }

    println!("\n{table}");
    let average = outcome.average_score();
    println!(
        "Average score: {average:.1}/10 ({:?})",
        score_band(average)
    );
}

fn save_reports(report: &InterviewReport, output: &std::path::Path, format: &str) -> Result<()> {
    std::fs::create_dir_all(output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("interview-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("interview-{timestamp}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use javaprep_core::model::{Difficulty, Question, Status};
    use javaprep_core::session::{Phase, NO_ANSWER_SENTINEL};
    use std::io::Cursor;

    fn started(n: u32) -> InterviewSession {
        let questions = (1..=n)
            .map(|id| Question {
                id,
                question: format!("Question {id}?"),
                answer: format!("Reference {id}"),
                difficulty: Difficulty::Medium,
                category: "Java Core".into(),
                status: Status::NotStarted,
            })
            .collect();
        InterviewSession::new().transition(SessionEvent::Start { questions })
    }

    fn run(session: InterviewSession, input: &str) -> (Option<InterviewSession>, String) {
        let mut out = Vec::new();
        let result = drive(session, Cursor::new(input.to_string()), &mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parse_commands() {
        assert_eq!(Input::parse(":next"), Input::Next);
        assert_eq!(Input::parse("  :goto 3 "), Input::Goto(3));
        assert_eq!(Input::parse(":goto 0"), Input::Unknown(":goto 0"));
        assert_eq!(Input::parse(":q"), Input::Quit);
        assert_eq!(Input::parse("final keyword"), Input::Text("final keyword"));
        assert_eq!(Input::parse(":nope"), Input::Unknown(":nope"));
    }

    #[test]
    fn lines_accumulate_into_current_answer() {
        let (session, _) = run(started(2), "first line\nsecond line\n:next\nother\n:submit\n");
        let session = session.unwrap();
        let draft = session.draft().unwrap();
        assert_eq!(draft.answer(1), "first line\nsecond line");
        assert_eq!(draft.answer(2), "other");
        assert!(draft.on_last_question());
    }

    #[test]
    fn submit_requires_last_question() {
        let (session, out) = run(started(3), ":submit\n:goto 3\n:submit\n");
        assert!(out.contains("Submit is available on the last question"));
        assert_eq!(session.unwrap().draft().unwrap().current_index(), 2);
    }

    #[test]
    fn hint_toggle_shows_reference_and_records_reveal() {
        let (session, out) = run(started(2), ":hint\n:hint\n");
        assert!(out.contains("Reference answer:\nReference 1"));
        assert!(out.contains("Hint hidden."));
        assert!(session.unwrap().draft().unwrap().hint_revealed(1));
    }

    #[test]
    fn quit_abandons_the_interview() {
        let (session, _) = run(started(2), "something\n:quit\n");
        assert!(session.is_none());
    }

    #[test]
    fn end_of_input_moves_to_last_question() {
        let (session, _) = run(started(3), "only the first\n");
        let session = session.unwrap().transition(SessionEvent::Submit);
        assert_eq!(session.phase(), Phase::Evaluating);
        let answers = session.submission().unwrap().answers().to_vec();
        assert_eq!(answers[0].user_answer, "only the first");
        assert_eq!(answers[1].user_answer, NO_ANSWER_SENTINEL);
    }

    #[test]
    fn ask_again_accepts_yes_only() {
        let mut out = Vec::new();
        let cases = [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false)];
        for (answer, expected) in cases {
            let mut input = Cursor::new(answer.to_string());
            assert_eq!(ask_again(&mut input, &mut out).unwrap(), expected);
        }
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Start another interview? [y/N]"));
    }

    #[test]
    fn ask_again_treats_end_of_input_as_no() {
        let mut out = Vec::new();
        assert!(!ask_again(&mut Cursor::new(String::new()), &mut out).unwrap());
    }

    #[test]
    fn drive_leaves_remaining_input_for_the_next_round() {
        let mut input = Cursor::new("one\n:submit\ny\n".to_string());
        let mut out = Vec::new();
        let session = drive(started(1), &mut input, &mut out).unwrap().unwrap();
        assert_eq!(session.draft().unwrap().answer(1), "one");
        assert!(ask_again(&mut input, &mut out).unwrap());
    }

    #[test]
    fn clear_empties_the_answer() {
        let (session, _) = run(started(1), "wrong\n:clear\nright\n");
        assert_eq!(session.unwrap().draft().unwrap().answer(1), "right");
    }
}
