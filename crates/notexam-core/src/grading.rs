//! Grading and exam scoring.
//!
//! Pure functions over parsed questions. Choice questions are graded by
//! exact set match: the full set of selected letters must equal the full
//! set of correct letters, with no partial credit.

use serde::{Deserialize, Serialize};

use crate::model::{ExamResult, Question, QuestionKind, Response};

/// Graded outcome of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Wrong,
    Skipped,
}

/// A question is skipped when no response was given, or when the response
/// is an empty selection or an empty string.
pub fn is_skipped(question: &Question) -> bool {
    question.response.as_ref().map_or(true, Response::is_empty)
}

/// Whether the submitted response matches the answer key.
///
/// Free-text answers are compared case-folded and trimmed. Choice answers
/// are normalized to a sorted, comma-joined set on both sides; a bare text
/// response to a choice question counts as a one-element set.
pub fn is_correct(question: &Question) -> bool {
    if is_skipped(question) {
        return false;
    }
    let Some(response) = &question.response else {
        return false;
    };

    match question.kind {
        QuestionKind::FreeText => {
            let Some(expected) = question.correct_answers.first() else {
                return false;
            };
            let given = match response {
                Response::Text(text) => text.as_str(),
                Response::Selected(_) => return false,
            };
            given.trim().to_lowercase() == expected.trim().to_lowercase()
        }
        QuestionKind::Single | QuestionKind::Multiple => {
            let selected = match response {
                Response::Selected(letters) => letters.clone(),
                Response::Text(text) => vec![text.clone()],
            };
            joined_sorted(&selected) == joined_sorted(&question.correct_answers)
        }
    }
}

fn joined_sorted(entries: &[String]) -> String {
    let mut sorted: Vec<&str> = entries.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(",")
}

/// Classify one question's outcome. Skipped takes precedence over wrong.
pub fn classify(question: &Question) -> Outcome {
    if is_skipped(question) {
        Outcome::Skipped
    } else if is_correct(question) {
        Outcome::Correct
    } else {
        Outcome::Wrong
    }
}

/// Fold a fully answered question sequence into an `ExamResult`.
///
/// Takes ownership of the sequence; the result carries it from here on.
/// `time_taken_secs` is passed through from the session driver, which is
/// the only place that reads the clock. Callers must not pass an empty
/// sequence.
pub fn score(questions: Vec<Question>, time_taken_secs: u64) -> ExamResult {
    let mut correct_count = 0;
    let mut wrong_count = 0;
    let mut skipped_count = 0;

    for question in &questions {
        match classify(question) {
            Outcome::Correct => correct_count += 1,
            Outcome::Wrong => wrong_count += 1,
            Outcome::Skipped => skipped_count += 1,
        }
    }

    let total_questions = questions.len();
    let percentage = (100.0 * correct_count as f64 / total_questions as f64).round() as u32;

    ExamResult {
        total_questions,
        correct_count,
        wrong_count,
        skipped_count,
        percentage,
        time_taken_secs,
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionOption;

    fn multiple_question(correct: &[&str]) -> Question {
        Question {
            id: "1".into(),
            text: "Pick all".into(),
            image: None,
            options: "ABCD"
                .chars()
                .map(|letter| QuestionOption {
                    letter,
                    text: format!("choice {letter}"),
                })
                .collect(),
            correct_answers: correct.iter().map(|s| s.to_string()).collect(),
            kind: QuestionKind::Multiple,
            response: None,
        }
    }

    fn freetext_question(expected: &str) -> Question {
        Question {
            id: "2".into(),
            text: "Open".into(),
            image: None,
            options: vec![],
            correct_answers: vec![expected.to_string()],
            kind: QuestionKind::FreeText,
            response: None,
        }
    }

    fn selected(letters: &[&str]) -> Option<Response> {
        Some(Response::Selected(
            letters.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn exact_set_match_ignores_order() {
        let mut q = multiple_question(&["A", "C"]);
        q.response = selected(&["C", "A"]);
        assert_eq!(classify(&q), Outcome::Correct);
    }

    #[test]
    fn partial_selection_is_wrong() {
        let mut q = multiple_question(&["A", "C"]);
        q.response = selected(&["A"]);
        assert_eq!(classify(&q), Outcome::Wrong);
    }

    #[test]
    fn superset_selection_is_wrong() {
        let mut q = multiple_question(&["A", "C"]);
        q.response = selected(&["A", "C", "D"]);
        assert_eq!(classify(&q), Outcome::Wrong);
    }

    #[test]
    fn empty_selection_is_skipped() {
        let mut q = multiple_question(&["A", "C"]);
        q.response = selected(&[]);
        assert_eq!(classify(&q), Outcome::Skipped);
        q.response = None;
        assert_eq!(classify(&q), Outcome::Skipped);
    }

    #[test]
    fn bare_text_counts_as_one_element_set() {
        let mut q = multiple_question(&["B"]);
        q.kind = QuestionKind::Single;
        q.response = Some(Response::Text("B".into()));
        assert_eq!(classify(&q), Outcome::Correct);
    }

    #[test]
    fn freetext_is_case_and_whitespace_insensitive() {
        let mut q = freetext_question("H2O");
        q.response = Some(Response::Text(" h2o ".into()));
        assert_eq!(classify(&q), Outcome::Correct);
    }

    #[test]
    fn freetext_mismatch_is_wrong() {
        let mut q = freetext_question("H2O");
        q.response = Some(Response::Text("CO2".into()));
        assert_eq!(classify(&q), Outcome::Wrong);
    }

    #[test]
    fn empty_answer_key_never_grades_correct() {
        let mut q = multiple_question(&[]);
        q.kind = QuestionKind::Single;
        q.response = selected(&["A"]);
        assert_eq!(classify(&q), Outcome::Wrong);

        let mut open = freetext_question("x");
        open.correct_answers.clear();
        open.response = Some(Response::Text("x".into()));
        assert_eq!(classify(&open), Outcome::Wrong);
    }

    #[test]
    fn score_counts_and_percentage() {
        let mut right = multiple_question(&["A", "C"]);
        right.response = selected(&["A", "C"]);
        let mut wrong = multiple_question(&["A"]);
        wrong.kind = QuestionKind::Single;
        wrong.response = selected(&["B"]);
        let skipped = freetext_question("x");

        let result = score(vec![right, wrong, skipped], 42);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.wrong_count, 1);
        assert_eq!(result.skipped_count, 1);
        assert_eq!(result.percentage, 33);
        assert_eq!(result.time_taken_secs, 42);
        assert_eq!(result.questions.len(), 3);
    }

    #[test]
    fn score_is_order_invariant() {
        let mut a = multiple_question(&["A"]);
        a.kind = QuestionKind::Single;
        a.response = selected(&["A"]);
        let mut b = multiple_question(&["B"]);
        b.kind = QuestionKind::Single;
        b.response = selected(&["C"]);
        let c = freetext_question("x");

        let forward = score(vec![a.clone(), b.clone(), c.clone()], 0);
        let backward = score(vec![c, b, a], 0);
        assert_eq!(forward.correct_count, backward.correct_count);
        assert_eq!(forward.wrong_count, backward.wrong_count);
        assert_eq!(forward.skipped_count, backward.skipped_count);
        assert_eq!(forward.percentage, backward.percentage);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let make = |ok: bool| {
            let mut q = multiple_question(&["A"]);
            q.kind = QuestionKind::Single;
            q.response = selected(&[if ok { "A" } else { "B" }]);
            q
        };
        // 2 of 3 correct rounds 66.67 up to 67.
        let result = score(vec![make(true), make(true), make(false)], 0);
        assert_eq!(result.percentage, 67);
        // 1 of 3 correct rounds 33.33 down to 33.
        let result = score(vec![make(true), make(false), make(false)], 0);
        assert_eq!(result.percentage, 33);
    }
}
