//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn javaprep(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("javaprep").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env_remove("JAVAPREP_GEMINI_KEY");
    cmd
}

fn java_core_bank() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../question-banks/java-core.toml")
}

fn write_mock_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("mock.toml");
    std::fs::write(
        &path,
        format!(
            "interview_size = 3\ndata_dir = \"{}\"\n{extra}\n[evaluator]\ntype = \"mock\"\nscore = 6.0\n",
            dir.join("data").display()
        ),
    )
    .unwrap();
    path
}

#[test]
fn validate_java_core_bank() {
    let dir = TempDir::new().unwrap();
    javaprep(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg(java_core_bank())
        .assert()
        .success()
        .stdout(predicate::str::contains("14 questions in 5 categories"))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    javaprep(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_reports_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("dup.toml");
    std::fs::write(
        &bank,
        r#"
[bank]
id = "dup"
name = "Dup"

[[categories]]
title = "A"

[[categories.questions]]
id = 1
question = "one"
answer = "1"

[[categories.questions]]
id = 1
question = "again"
answer = "1"
"#,
    )
    .unwrap();

    javaprep(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg(&bank)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate question id 1"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    javaprep(dir.path())
        .arg("init")
        .arg("--mock")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created javaprep.toml"))
        .stdout(predicate::str::contains("Created question-banks/example.toml"));

    assert!(dir.path().join("javaprep.toml").exists());
    assert!(dir.path().join("question-banks/example.toml").exists());

    // The generated files work together without any flags.
    javaprep(dir.path())
        .arg("study")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1/1 (3 questions)"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    javaprep(dir.path()).arg("init").assert().success();

    javaprep(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn study_filters_by_category_and_difficulty() {
    let dir = TempDir::new().unwrap();

    javaprep(dir.path())
        .arg("study")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--category")
        .arg("Collections")
        .assert()
        .success()
        .stdout(predicate::str::contains("HashMap"))
        .stdout(predicate::str::contains("Page 1/1 (3 questions)"));

    javaprep(dir.path())
        .arg("study")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--difficulty")
        .arg("hard")
        .assert()
        .success()
        .stdout(predicate::str::contains("(3 questions)"));
}

#[test]
fn study_clamps_page_and_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();

    javaprep(dir.path())
        .arg("study")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--page")
        .arg("99")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 2/2 (14 questions)"));

    javaprep(dir.path())
        .arg("study")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--category")
        .arg("Kotlin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn mark_then_progress() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");

    javaprep(dir.path())
        .arg("mark")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--id")
        .arg("7")
        .arg("--status")
        .arg("learned")
        .arg("--data-dir")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 7 marked learned."));

    let stored = std::fs::read_to_string(data.join("javaInterviewProgress.json")).unwrap();
    assert!(stored.contains("\"7\": \"learned\""));

    javaprep(dir.path())
        .arg("progress")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--data-dir")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Learned 1/14 (7%)"))
        .stdout(predicate::str::contains("33%"));

    javaprep(dir.path())
        .arg("study")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--status")
        .arg("learned")
        .arg("--data-dir")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 questions)"));
}

#[test]
fn mark_unknown_question_fails() {
    let dir = TempDir::new().unwrap();

    javaprep(dir.path())
        .arg("mark")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--id")
        .arg("999")
        .arg("--status")
        .arg("important")
        .arg("--data-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question id: 999"));
}

#[test]
fn interview_with_mock_evaluator() {
    let dir = TempDir::new().unwrap();
    let config = write_mock_config(dir.path(), "");
    let reports = dir.path().join("reports");

    javaprep(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("interview")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--seed")
        .arg("42")
        .arg("--output")
        .arg(&reports)
        .arg("--format")
        .arg("all")
        .write_stdin("first answer\n:next\n:hint\nsecond answer\n:next\n:submit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 questions from Java Core"))
        .stdout(predicate::str::contains("Reference answer:"))
        .stdout(predicate::str::contains("Average score: 6.0/10"));

    let files: Vec<_> = std::fs::read_dir(&reports)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 2);

    let json_path = files
        .iter()
        .find(|p| p.extension().is_some_and(|e| e == "json"))
        .unwrap();
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["user_answer"], "first answer");
    assert_eq!(rows[1]["hint_revealed"], true);
    assert_eq!(rows[2]["user_answer"], "Không có câu trả lời.");
    assert_eq!(report["evaluator"], "mock");
}

#[test]
fn interview_quit_abandons() {
    let dir = TempDir::new().unwrap();
    let config = write_mock_config(dir.path(), "");

    javaprep(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("interview")
        .arg("--bank")
        .arg(java_core_bank())
        .write_stdin("an answer\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interview abandoned."))
        .stdout(predicate::str::contains("Average score").not());
}

#[test]
fn interview_can_start_again_after_results() {
    let dir = TempDir::new().unwrap();
    let config = write_mock_config(dir.path(), "");

    let output = javaprep(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("interview")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--seed")
        .arg("7")
        .write_stdin("first\n:goto 3\n:submit\ny\nsecond\n:goto 3\n:submit\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Interview 1: 3 questions from Java Core"))
        .stdout(predicate::str::contains("Interview 2: 3 questions from Java Core"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("Average score: 6.0/10").count(), 2);
    assert_eq!(stdout.matches("Start another interview? [y/N]").count(), 2);
}

#[test]
fn interview_uses_configured_bank() {
    let dir = TempDir::new().unwrap();
    let config = write_mock_config(
        dir.path(),
        &format!("question_bank = \"{}\"", java_core_bank().display()),
    );

    javaprep(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("interview")
        .arg("--count")
        .arg("2")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 questions from Java Core"))
        .stdout(predicate::str::contains("Average score: 6.0/10"));
}

#[test]
fn interview_without_bank_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_mock_config(dir.path(), "");

    javaprep(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("interview")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no question bank given"));
}

#[test]
fn flashcards_flip_and_quit() {
    let dir = TempDir::new().unwrap();

    javaprep(dir.path())
        .arg("flashcards")
        .arg("--bank")
        .arg(java_core_bank())
        .arg("--seed")
        .arg("1")
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("f\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/14]"))
        .stdout(predicate::str::contains("[2/14]"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    javaprep(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Java interview practice with AI feedback",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    javaprep(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("javaprep"));
}
