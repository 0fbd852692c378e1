//! The `notexam review` command.

use std::path::PathBuf;

use anyhow::Result;

use notexam_core::report::{render_summary, render_wrong_answers, ExamReport};

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = ExamReport::load_json(&report_path)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Session {} from {}, source: {}",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M"),
        report.source
    );
    println!("{}", render_summary(&report.result));

    let wrong = render_wrong_answers(&report.result);
    if wrong.is_empty() {
        println!("\nEvery question was answered correctly.");
    } else {
        println!("\nFor review:\n");
        println!("{wrong}");
    }

    Ok(())
}
