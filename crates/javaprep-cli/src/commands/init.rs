//! The `javaprep init` command.

use anyhow::Result;

pub fn execute(mock: bool) -> Result<()> {
    // Create javaprep.toml
    if std::path::Path::new("javaprep.toml").exists() {
        println!("javaprep.toml already exists, skipping.");
    } else {
        let config = if mock { MOCK_CONFIG } else { GEMINI_CONFIG };
        std::fs::write("javaprep.toml", config)?;
        println!("Created javaprep.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("question-banks")?;
    let example_path = std::path::Path::new("question-banks/example.toml");
    if example_path.exists() {
        println!("question-banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created question-banks/example.toml");
    }

    println!("\nNext steps:");
    if !mock {
        println!("  1. Export GEMINI_API_KEY or edit javaprep.toml");
    }
    println!("  - Run: javaprep validate --bank question-banks/example.toml");
    println!("  - Run: javaprep study");
    println!("  - Run: javaprep interview");

    Ok(())
}

const GEMINI_CONFIG: &str = r#"# javaprep configuration

interview_size = 10
request_timeout_secs = 60
data_dir = ".javaprep"
question_bank = "question-banks/example.toml"

[evaluator]
type = "gemini"
api_key = "${GEMINI_API_KEY}"
model = "gemini-2.5-flash"
"#;

const MOCK_CONFIG: &str = r#"# javaprep configuration (offline)

interview_size = 10
request_timeout_secs = 60
data_dir = ".javaprep"
question_bank = "question-banks/example.toml"

[evaluator]
type = "mock"
score = 7.0
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Java Questions"
description = "A small bank to get started"

[[categories]]
title = "Java Core"

[[categories.questions]]
id = 1
question = "What is the difference between == and equals() in Java?"
answer = "== compares references for objects and values for primitives; equals() compares logical equality as defined by the class."
difficulty = "easy"

[[categories.questions]]
id = 2
question = "What does the final keyword mean on a class, a method and a variable?"
answer = "A final class cannot be subclassed, a final method cannot be overridden, and a final variable can be assigned only once."
difficulty = "easy"

[[categories]]
title = "Collections"

[[categories.questions]]
id = 3
question = "How does HashMap store its entries?"
answer = "An array of buckets indexed by the key's hash; colliding entries form a linked list that becomes a red-black tree when large."
difficulty = "medium"
"#;
