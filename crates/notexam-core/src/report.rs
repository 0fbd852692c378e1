//! Exam reports: JSON persistence and plain-text renderings.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::{classify, Outcome};
use crate::model::{ExamResult, Question, Response};

/// A persisted record of one graded exam session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the session was submitted.
    pub created_at: DateTime<Utc>,
    /// The note file or directory the questions came from.
    pub source: String,
    /// The graded result, including final responses.
    pub result: ExamResult,
}

impl ExamReport {
    /// Wrap a freshly graded result in a new report.
    pub fn new(source: impl Into<String>, result: ExamResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: source.into(),
            result,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExamReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Render every non-correct question for later review.
///
/// One block per question: the prompt line, each option, the answer key,
/// and the given response, blocks separated by a blank line. Needs nothing
/// beyond the result itself.
pub fn render_wrong_answers(result: &ExamResult) -> String {
    let mut out = String::new();
    for question in result
        .questions
        .iter()
        .filter(|q| classify(q) != Outcome::Correct)
    {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("Q{}. {}\n", question.id, question.text));
        for option in &question.options {
            out.push_str(&format!("{}. {}\n", option.letter, option.text));
        }
        out.push_str(&format!(
            "Answer: {}\n",
            question.correct_answers.join(", ")
        ));
        out.push_str(&format!("Your answer: {}\n", response_display(question)));
    }
    out
}

/// Compact one-line summary of a graded result.
pub fn render_summary(result: &ExamResult) -> String {
    format!(
        "{} questions: {} correct, {} wrong, {} skipped ({}%) in {}s",
        result.total_questions,
        result.correct_count,
        result.wrong_count,
        result.skipped_count,
        result.percentage,
        result.time_taken_secs
    )
}

fn response_display(question: &Question) -> String {
    match &question.response {
        None => "(skipped)".to_string(),
        Some(response) if response.is_empty() => "(skipped)".to_string(),
        Some(Response::Selected(letters)) => letters.join(", "),
        Some(Response::Text(text)) => text.clone(),
    }
}
