//! The `javaprep study` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use javaprep_core::model::{Difficulty, Question};
use javaprep_core::study::{paginate, QuestionFilter, QUESTIONS_PER_PAGE};

use super::{parse_status, truncate, Workspace};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config_path: Option<PathBuf>,
    bank: Option<PathBuf>,
    category: Option<String>,
    keyword: Option<String>,
    difficulty: Option<String>,
    status: Option<String>,
    page: usize,
    answers: bool,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let tracker = Workspace::open(config_path.as_deref(), bank)?.tracker(data_dir);

    if let Some(category) = &category {
        anyhow::ensure!(
            tracker.bank().category_titles().contains(&category.as_str()),
            "unknown category '{category}'. Available: {:?}",
            tracker.bank().category_titles()
        );
    }

    let difficulties = match &difficulty {
        Some(list) => list
            .split(',')
            .map(|s| s.parse::<Difficulty>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let filter = QuestionFilter {
        category,
        keyword,
        difficulties,
        status: status.as_deref().map(parse_status).transpose()?,
    };

    let matched: Vec<Question> = filter
        .apply(tracker.questions())
        .into_iter()
        .cloned()
        .collect();
    let page = paginate(&matched, page, QUESTIONS_PER_PAGE);

    if page.items.is_empty() {
        println!("No questions match.");
        return Ok(());
    }

    let mut table = Table::new();
    let mut header = vec!["ID", "Category", "Difficulty", "Status", "Question"];
    if answers {
        header.push("Answer");
    }
    table.set_header(header);

    for q in &page.items {
        let mut row = vec![
            Cell::new(q.id),
            Cell::new(&q.category),
            Cell::new(q.difficulty),
            Cell::new(q.status),
            Cell::new(&q.question),
        ];
        if answers {
            row.push(Cell::new(truncate(&q.answer, 120)));
        }
        table.add_row(row);
    }

    println!("{table}");
    println!(
        "Page {}/{} ({} questions)",
        page.page, page.total_pages, page.total_items
    );

    Ok(())
}
