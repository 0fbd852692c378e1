//! Session input error types.
//!
//! Typed so the session driver can tell a recoverable bad selection apart
//! from everything else and re-prompt, without string matching.

use thiserror::Error;

/// Errors that can occur when interpreting raw session input as a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// A token in a choice selection was not a single letter.
    #[error("'{token}' is not an option letter")]
    NotALetter { token: String },

    /// The selected letter does not name any option of the question.
    #[error("this question has no option '{letter}'")]
    UnknownOption { letter: char },

    /// The same option was selected more than once.
    #[error("option '{letter}' selected more than once")]
    DuplicateSelection { letter: char },
}
