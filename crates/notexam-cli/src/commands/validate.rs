//! The `notexam validate` command.

use std::path::PathBuf;

use anyhow::Result;

use notexam_core::model::QuestionKind;
use notexam_core::parser;

pub fn execute(notes: PathBuf) -> Result<()> {
    let questions = if notes.is_dir() {
        parser::load_notes_directory(&notes)?
    } else {
        parser::load_notes(&notes)?
    };

    if questions.is_empty() {
        println!("{}: no questions recognized", notes.display());
        return Ok(());
    }

    let count_kind = |kind: QuestionKind| questions.iter().filter(|q| q.kind == kind).count();
    println!(
        "{}: {} question(s) ({} single, {} multiple, {} free-text)",
        notes.display(),
        questions.len(),
        count_kind(QuestionKind::Single),
        count_kind(QuestionKind::Multiple),
        count_kind(QuestionKind::FreeText),
    );

    let warnings = parser::validate_questions(&questions);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [Q{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
