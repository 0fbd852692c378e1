//! Tolerant, line-oriented question parser.
//!
//! Recovers structured question records from loosely formatted note text.
//! Blocks that cannot be parsed are skipped rather than failing the whole
//! parse; an empty result is the only failure signal, and deciding how to
//! surface "no questions found" is left to the caller.

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::{Question, QuestionKind, QuestionOption};

/// Lines containing this marker (case-insensitive) are authoring hints and
/// are dropped from the prompt text.
const HINT_MARKER: &str = "hint:";

/// Compiled patterns for one parse run.
struct Patterns {
    /// A question marker anywhere in the input: `Q<digits>.`
    marker: Regex,
    /// A block's first line: `Q<digits>.<rest>`
    header: Regex,
    /// An option line: `<uppercase letter>.<space><rest>`
    option: Regex,
    /// An answer line: `Answer:<rest>`, case-insensitive.
    answer: Regex,
    /// A line that is purely a `![[target]]` image embed.
    wiki_image_line: Regex,
    /// A line that is purely a `![alt](target)` Markdown image.
    markdown_image_line: Regex,
    /// A `![[target]]` embed anywhere in a string.
    wiki_image: Regex,
    /// A `![alt](target)` image anywhere in a string.
    markdown_image: Regex,
    /// A comma-separated list of two or more single uppercase letters.
    letter_list: Regex,
    /// Exactly one uppercase letter.
    single_letter: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            marker: Regex::new(r"Q\d+\.").unwrap(),
            header: Regex::new(r"^Q(\d+)\.(.*)$").unwrap(),
            option: Regex::new(r"^([A-Z])\.\s+(.*)$").unwrap(),
            answer: Regex::new(r"(?i)^answer:(.*)$").unwrap(),
            wiki_image_line: Regex::new(r"^!\[\[([^\[\]]+)\]\]$").unwrap(),
            markdown_image_line: Regex::new(r"^!\[[^\]]*\]\(([^()]+)\)$").unwrap(),
            wiki_image: Regex::new(r"!\[\[([^\[\]]+)\]\]").unwrap(),
            markdown_image: Regex::new(r"!\[[^\]]*\]\(([^()]+)\)").unwrap(),
            letter_list: Regex::new(r"^[A-Z](\s*,\s*[A-Z])+$").unwrap(),
            single_letter: Regex::new(r"^[A-Z]$").unwrap(),
        }
    }
}

/// Parse raw note text into an ordered sequence of questions.
///
/// Never fails: malformed blocks are dropped and parsing continues with the
/// next marker. Text before the first `Q<digits>.` marker (note preamble)
/// is ignored.
pub fn parse_questions(raw: &str) -> Vec<Question> {
    let patterns = Patterns::new();

    // The original format starts a new block at every marker occurrence, so
    // the input is sliced at each match start (the regex crate has no
    // lookahead split).
    let starts: Vec<usize> = patterns.marker.find_iter(raw).map(|m| m.start()).collect();

    let mut questions = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(raw.len());
        match parse_block(&raw[start..end], &patterns) {
            Some(question) => questions.push(question),
            None => tracing::debug!("skipping unparsable block at offset {}", start),
        }
    }
    questions
}

/// Parse one block beginning at a question marker.
fn parse_block(block: &str, patterns: &Patterns) -> Option<Question> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let header = patterns.header.captures(lines.first()?)?;
    let id = header[1].to_string();

    let mut text_parts: Vec<String> = Vec::new();
    let seed = header[2].trim();
    if !seed.is_empty() {
        text_parts.push(seed.to_string());
    }

    let mut image: Option<String> = None;
    let mut index = 1;

    // Text accumulation: everything up to the first option or answer line
    // joins the prompt. Pure image lines are captured (first one wins) and
    // hint lines are dropped.
    while index < lines.len() {
        let line = lines[index];
        if patterns.option.is_match(line) || patterns.answer.is_match(line) {
            break;
        }
        if let Some(target) = image_line_target(line, patterns) {
            if image.is_none() {
                image = Some(target);
            }
        } else if !line.to_lowercase().contains(HINT_MARKER) {
            text_parts.push(line.to_string());
        }
        index += 1;
    }

    let mut text = text_parts.join(" ");

    // The prompt itself may carry an embedded image reference; extract it
    // only when no standalone image line was seen.
    if image.is_none() {
        if let Some((target, range)) = embedded_image(&text, patterns) {
            image = Some(target);
            text.replace_range(range, "");
            text = text.trim().to_string();
        }
    }

    // Option phase: collect option lines until the answer line or the end
    // of the block. Anything else in between is ignored.
    let mut options: Vec<QuestionOption> = Vec::new();
    let mut answer_line: Option<String> = None;
    while index < lines.len() {
        let line = lines[index];
        if let Some(answer) = patterns.answer.captures(line) {
            answer_line = Some(answer[1].trim().to_string());
            break;
        }
        if let Some(option) = patterns.option.captures(line) {
            options.push(QuestionOption {
                letter: option[1].chars().next()?,
                text: option[2].trim().to_string(),
            });
        }
        index += 1;
    }

    // Answer classification: a comma-joined letter list, a single letter,
    // or anything else as one free-text entry. A missing answer line leaves
    // the key empty; the question is kept but can only grade wrong.
    let correct_answers: Vec<String> = match answer_line {
        None => Vec::new(),
        Some(answer) => {
            if patterns.letter_list.is_match(&answer) {
                answer
                    .split(',')
                    .map(|letter| letter.trim().to_uppercase())
                    .collect()
            } else {
                vec![answer]
            }
        }
    };

    let kind = if options.is_empty() {
        QuestionKind::FreeText
    } else if correct_answers.len() > 1
        && correct_answers
            .iter()
            .all(|answer| patterns.single_letter.is_match(answer))
    {
        QuestionKind::Multiple
    } else {
        QuestionKind::Single
    };

    Some(Question {
        id,
        text,
        image,
        options,
        correct_answers,
        kind,
        response: None,
    })
}

/// The image target if this line is purely an image reference.
fn image_line_target(line: &str, patterns: &Patterns) -> Option<String> {
    if let Some(captures) = patterns.wiki_image_line.captures(line) {
        return Some(captures[1].to_string());
    }
    if let Some(captures) = patterns.markdown_image_line.captures(line) {
        return Some(captures[1].to_string());
    }
    None
}

/// The first embedded image reference in `text`, with the byte range of the
/// full match so the caller can cut it out.
fn embedded_image(text: &str, patterns: &Patterns) -> Option<(String, std::ops::Range<usize>)> {
    if let Some(captures) = patterns.wiki_image.captures(text) {
        let whole = captures.get(0)?;
        return Some((captures[1].to_string(), whole.range()));
    }
    if let Some(captures) = patterns.markdown_image.captures(text) {
        let whole = captures.get(0)?;
        return Some((captures[1].to_string(), whole.range()));
    }
    None
}

/// Read a single note file and parse its questions.
pub fn load_notes(path: &Path) -> Result<Vec<Question>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read note file: {}", path.display()))?;
    Ok(parse_questions(&content))
}

/// Recursively collect questions from all `.md` files under a directory.
pub fn load_notes_directory(dir: &Path) -> Result<Vec<Question>> {
    let mut questions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            questions.extend(load_notes_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            match load_notes(&path) {
                Ok(parsed) => questions.extend(parsed),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(questions)
}

/// A warning from question validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check parsed questions for common authoring issues.
///
/// Warnings never block a session. The recovery policy keeps every
/// recognizable question, including ones that can only ever grade wrong;
/// this is where those get pointed out.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate ids
    let mut seen_ids = std::collections::HashSet::new();
    for question in questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question id: {}", question.id),
            });
        }
    }

    // Empty prompts
    for question in questions {
        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt text is empty".into(),
            });
        }
    }

    // Missing answer line
    for question in questions {
        if question.correct_answers.is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "no Answer: line; this question always grades wrong".into(),
            });
        }
    }

    // Answer entries that name no option
    for question in questions {
        if question.options.is_empty() {
            continue;
        }
        for answer in &question.correct_answers {
            if !question
                .options
                .iter()
                .any(|option| option.letter.to_string() == *answer)
            {
                warnings.push(ValidationWarning {
                    question_id: Some(question.id.clone()),
                    message: format!("answer '{answer}' does not name any option"),
                });
            }
        }
    }

    warnings
}
