//! The `notexam run` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use notexam_core::grading::score;
use notexam_core::model::{ExamResult, Question, Response};
use notexam_core::parser;
use notexam_core::report::{render_wrong_answers, ExamReport};
use notexam_core::shuffle;

use crate::config::load_config_from;

pub fn execute(
    notes: PathBuf,
    shuffle_questions: bool,
    shuffle_options: bool,
    limit: Option<usize>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if let Some(limit) = limit {
        anyhow::ensure!(limit >= 1, "limit must be at least 1");
    }

    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let mut questions = if notes.is_dir() {
        parser::load_notes_directory(&notes)?
    } else {
        parser::load_notes(&notes)?
    };

    anyhow::ensure!(
        !questions.is_empty(),
        "no questions found in {}",
        notes.display()
    );
    tracing::debug!("parsed {} question(s) from {}", questions.len(), notes.display());

    let mut rng = rand::thread_rng();
    if shuffle_questions || config.shuffle_questions {
        questions = shuffle::shuffle_questions(&questions, &mut rng);
    }
    if shuffle_options || config.shuffle_options {
        questions = questions
            .iter()
            .map(|question| shuffle::shuffle_options(question, &mut rng))
            .collect();
    }
    if let Some(limit) = limit {
        questions.truncate(limit);
    }

    let total = questions.len();
    eprintln!("notexam: {total} question(s) loaded from {}", notes.display());
    eprintln!("Answer with option letters (\"A\" or \"A,C\"), or plain text for open questions.");
    eprintln!("Press Enter on an empty line to skip a question.\n");

    let stdin = io::stdin();
    let mut input_lines = stdin.lock().lines();
    let started = Instant::now();

    for (index, question) in questions.iter_mut().enumerate() {
        present_question(index + 1, total, question);
        let response = read_response(&mut input_lines, question)?;
        question.response = response;
    }

    let elapsed_secs = started.elapsed().as_secs();
    let result = score(questions, elapsed_secs);

    print_summary(&result);

    let wrong = render_wrong_answers(&result);
    if !wrong.is_empty() {
        println!("\nFor review:\n");
        println!("{wrong}");
    }

    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let path = output.join(format!("session-{timestamp}.json"));
    let report = ExamReport::new(notes.display().to_string(), result);
    report.save_json(&path)?;
    eprintln!("Report saved to: {}", path.display());

    Ok(())
}

fn present_question(number: usize, total: usize, question: &Question) {
    println!("[{number}/{total}] Q{}. {}", question.id, question.text);
    if let Some(image) = &question.image {
        println!("  (image: {image})");
    }
    for option in &question.options {
        println!("  {}. {}", option.letter, option.text);
    }
}

/// Prompt until the input parses as a response for this question.
///
/// EOF on stdin skips this and every remaining question.
fn read_response(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    question: &Question,
) -> Result<Option<Response>> {
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(None);
        };
        match Response::parse(&line?, question) {
            Ok(response) => {
                println!();
                return Ok(response);
            }
            Err(e) => println!("  {e}, try again"),
        }
    }
}

fn print_summary(result: &ExamResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Total", "Correct", "Wrong", "Skipped", "Score", "Time"]);
    table.add_row(vec![
        Cell::new(result.total_questions),
        Cell::new(result.correct_count),
        Cell::new(result.wrong_count),
        Cell::new(result.skipped_count),
        Cell::new(format!("{}%", result.percentage)),
        Cell::new(format!("{}s", result.time_taken_secs)),
    ]);

    println!("\n{table}");
}
