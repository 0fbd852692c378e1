//! Ordering utilities for exam sessions.
//!
//! Shuffles return a fresh sequence and leave the input untouched, so a
//! shuffled session can only be reproduced by reseeding, never by
//! re-shuffling already-shuffled state.

use rand::Rng;

use crate::model::Question;

/// Unbiased Fisher-Yates shuffle into a new vector.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Reorder the full question sequence for one session.
pub fn shuffle_questions<R: Rng + ?Sized>(questions: &[Question], rng: &mut R) -> Vec<Question> {
    shuffled(questions, rng)
}

/// Reorder the options within a single question.
pub fn shuffle_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Question {
    let mut reordered = question.clone();
    reordered.options = shuffled(&question.options, rng);
    reordered
}
