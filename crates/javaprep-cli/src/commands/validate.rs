//! The `javaprep validate` command.

use std::path::PathBuf;

use anyhow::Result;

use javaprep_core::parser;
use javaprep_core::session::INTERVIEW_QUESTION_COUNT;
use javaprep_providers::load_config_from;

pub fn execute(config_path: Option<PathBuf>, bank_path: PathBuf) -> Result<()> {
    let interview_size = match config_path {
        Some(path) => load_config_from(Some(&path))?.interview_size,
        None => INTERVIEW_QUESTION_COUNT,
    };

    let banks = if bank_path.is_dir() {
        parser::load_bank_directory(&bank_path)?
    } else {
        vec![parser::parse_question_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "Bank: {} ({} questions in {} categories)",
            bank.name,
            bank.question_count(),
            bank.categories.len()
        );

        let warnings = parser::validate_question_bank(bank, interview_size);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if bank_path.is_dir() && banks.len() > 1 {
        // Ids must also be unique across files.
        parser::load_bank(&bank_path)?;
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
