//! # word_match_quiz
//!
//! Engine for a picture-matching word quiz. The player sees a word and picks
//! the matching picture from three options.
//!
//! ## How it works
//!
//! 1. Pick a [`Category`] from the [`Catalog`]. Use the built-in word lists or
//!    load your own from JSON.
//! 2. [`generate_quiz`] builds one question per item in random order. Every
//!    word is asked exactly once. Each question shows the target and two
//!    distractors, with the target in a random slot.
//! 3. A [`Session`] scores each pick once. It locks the question against
//!    double taps and hands back an [`AdvanceTicket`] for the delayed move to
//!    the next question.
//! 4. When the last question advances, the session yields a [`QuizResult`].
//!    [`rate`] turns it into a star [`Tier`].
//!
//! [`QuizController`] wires these together with a Tokio timer. It owns the
//! menu / playing / finished screens and cancels pending advances whenever a
//! quiz is replaced or abandoned.
//!
//! ## Key features
//!
//! - **Deterministic**: pass `rng_seed: Some(u64)` in [`QuizConfig`] (or any
//!   seeded `rand::Rng` to [`generate_quiz`]) to reproduce the same quiz.
//! - **Unbiased**: question order and option layout use Fisher-Yates.
//! - **Safe timers**: a stale advance can never move a newer session.
//!
//! ## Quick start
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use word_match_quiz::{rate, Advance, Catalog, NoFeedback, QuizConfig, Session, Submission, Tier};
//!
//! let catalog = Catalog::builtin();
//! let animals = catalog.get("animals").unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut session = Session::start(animals, &QuizConfig::default(), &mut rng).unwrap();
//!
//! let result = loop {
//!     let target = session.current_question().unwrap().target.id.clone();
//!     let Submission::Evaluated { ticket, .. } = session.submit_answer(&target, &NoFeedback).unwrap() else {
//!         unreachable!("a fresh question is never locked");
//!     };
//!     // A real UI waits `advance_delay` here so the player sees the feedback.
//!     if let Advance::Ended(result) = session.advance(ticket) {
//!         break result;
//!     }
//! };
//!
//! assert_eq!(result.score, result.total);
//! assert_eq!(rate(result.score, result.total).unwrap(), Tier::ThreeStars);
//! ```

pub mod quiz_engine;
pub mod view;

pub use quiz_engine::{
    generate_quiz, rate, Advance, AdvanceTicket, Catalog, Category, FeedbackSink, Item,
    NoFeedback, OptionMark, Progress, Question, Quiz, QuizConfig, QuizController, QuizError,
    QuizObserver, QuizResult, Screen, Session, Submission, Tier,
};
