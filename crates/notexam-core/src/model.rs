//! Core data model types for notexam.
//!
//! These are the fundamental types the whole system uses to represent
//! parsed questions, submitted responses, and graded exam results.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ResponseError;

/// A single selectable choice within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Option letter, a single uppercase character A-Z. Unique within a
    /// question.
    pub letter: char,
    /// Display text of the choice.
    pub text: String,
}

/// How a question is answered, derived from its parsed shape.
///
/// The kind is a property of the parsed data, not an identity chosen up
/// front: a question with options whose answer line is not a letter list
/// still classifies as `Single`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Options present, exactly one correct letter (or a non-letter answer).
    Single,
    /// Options present, two or more correct letters, all must be selected.
    Multiple,
    /// No options; the answer is compared as text.
    FreeText,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Single => write!(f, "single"),
            QuestionKind::Multiple => write!(f, "multiple"),
            QuestionKind::FreeText => write!(f, "freetext"),
        }
    }
}

/// A submitted answer for one question: selected option letters for choice
/// questions, or the typed text for free-text questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Selected option letters, in selection order.
    Selected(Vec<String>),
    /// Free-text answer as typed.
    Text(String),
}

impl Response {
    /// Interpret one line of raw session input as a response to `question`.
    ///
    /// Empty input means the question is being skipped and yields
    /// `Ok(None)`. For choice questions the input is a comma-separated list
    /// of option letters, each of which must name one of the question's
    /// options; free-text questions accept the trimmed input verbatim.
    pub fn parse(input: &str, question: &Question) -> Result<Option<Response>, ResponseError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        if question.kind == QuestionKind::FreeText {
            return Ok(Some(Response::Text(input.to_string())));
        }

        let mut letters: Vec<String> = Vec::new();
        for token in input.split(',') {
            let token = token.trim();
            let mut chars = token.chars();
            let (Some(first), None) = (chars.next(), chars.next()) else {
                return Err(ResponseError::NotALetter {
                    token: token.to_string(),
                });
            };
            if !first.is_ascii_alphabetic() {
                return Err(ResponseError::NotALetter {
                    token: token.to_string(),
                });
            }
            let letter = first.to_ascii_uppercase();
            if !question.options.iter().any(|o| o.letter == letter) {
                return Err(ResponseError::UnknownOption { letter });
            }
            let selected = letter.to_string();
            if letters.contains(&selected) {
                return Err(ResponseError::DuplicateSelection { letter });
            }
            letters.push(selected);
        }
        Ok(Some(Response::Selected(letters)))
    }

    /// True when the response carries no selection and no text.
    pub fn is_empty(&self) -> bool {
        match self {
            Response::Selected(letters) => letters.is_empty(),
            Response::Text(text) => text.is_empty(),
        }
    }
}

/// A parsed exam question.
///
/// Immutable once parsed, except for `response`, which the session driver
/// fills in as the user answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Numeric token from the `Q<digits>.` marker, leading zeros preserved.
    /// Not guaranteed unique across malformed input.
    pub id: String,
    /// Prompt text, normalized to a single line.
    pub text: String,
    /// Vault-relative path or URL of an attached image, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Choices in display order. Empty for free-text questions.
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    /// Option letters, or a single free-text answer. Empty when the source
    /// block had no `Answer:` line; such a question can only grade wrong.
    #[serde(default)]
    pub correct_answers: Vec<String>,
    /// Derived from options and answer shape at parse time.
    pub kind: QuestionKind,
    /// The submitted answer, if any.
    #[serde(default)]
    pub response: Option<Response>,
}

/// Aggregate outcome of one graded exam session.
///
/// Created once at submission time and read-only thereafter; it takes
/// ownership of the answered question sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    /// Number of questions in the session.
    pub total_questions: usize,
    /// Questions graded correct.
    pub correct_count: usize,
    /// Questions answered but graded wrong.
    pub wrong_count: usize,
    /// Questions with no (or an empty) response.
    pub skipped_count: usize,
    /// `round(100 * correct / total)`.
    pub percentage: u32,
    /// Elapsed seconds, measured and supplied by the session driver.
    pub time_taken_secs: u64,
    /// The question sequence with final responses.
    pub questions: Vec<Question>,
}
