//! The `javaprep mark` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{parse_status, Workspace};

pub fn execute(
    config_path: Option<PathBuf>,
    bank: Option<PathBuf>,
    id: u32,
    status: String,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let status = parse_status(&status)?;
    let mut tracker = Workspace::open(config_path.as_deref(), bank)?.tracker(data_dir);

    tracker.set_status(id, status)?;
    println!("Question {id} marked {status}.");

    let summary = tracker.summary();
    println!(
        "Learned {}/{} ({}%)",
        summary.learned, summary.total, summary.percent_learned
    );
    Ok(())
}
