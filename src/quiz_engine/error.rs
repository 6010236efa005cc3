//! Error types for the quiz engine.
//!
//! Every variant is a caller error: a bad catalog, a misused session, or a
//! score that cannot be rated. None of them are transient, so nothing here is
//! worth retrying. Repeated answers on a locked question are not errors at all;
//! they come back as [`Submission::Ignored`](crate::Submission::Ignored).

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// A category needs one target and two distractors per question.
    #[error("category '{category}' has {found} items, at least {required} are required")]
    TooFewItems { category: String, found: usize, required: usize },

    #[error("category '{category}' contains item id '{item}' more than once")]
    DuplicateItemId { category: String, item: String },

    #[error("catalog contains no categories")]
    EmptyCatalog,

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The id is not one of the options on screen.
    #[error("option '{0}' is not part of the current question")]
    UnknownOption(String),

    #[error("session has already ended")]
    SessionEnded,

    /// The auto-advance delay needs a Tokio runtime to run on.
    #[error("no Tokio runtime is available to schedule the next question")]
    NoRuntime,

    #[error("no quiz is in progress")]
    NoActiveSession,

    #[error("cannot rate a score against a total of zero")]
    ZeroTotal,

    #[error("invalid catalog JSON: {0}")]
    Catalog(#[from] serde_json::Error),
}
