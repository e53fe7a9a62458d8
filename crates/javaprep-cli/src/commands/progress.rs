//! The `javaprep progress` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::Workspace;

pub fn execute(
    config_path: Option<PathBuf>,
    bank: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let tracker = Workspace::open(config_path.as_deref(), bank)?.tracker(data_dir);
    let summary = tracker.summary();

    println!("Bank: {}", tracker.bank().name);
    println!(
        "Learned {}/{} ({}%), needs review {}, important {}",
        summary.learned,
        summary.total,
        summary.percent_learned,
        summary.needs_review,
        summary.important
    );

    let mut table = Table::new();
    table.set_header(vec!["Category", "Learned", "Total", "Progress"]);
    for stats in tracker.category_stats() {
        table.add_row(vec![
            Cell::new(&stats.title),
            Cell::new(stats.learned),
            Cell::new(stats.total),
            Cell::new(format!("{}%", stats.progress)),
        ]);
    }
    println!("\n{table}");

    Ok(())
}
