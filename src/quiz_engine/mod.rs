//! Core quiz engine: catalog, quiz generation, session state and scoring.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: items, categories, questions, results, progress |
//! | `error`      | `QuizError`, the single error type for every precondition failure |
//! | `config`     | `QuizConfig`: points per answer, advance delay, RNG seed |
//! | `shuffle`    | Fisher-Yates shuffle over any slice |
//! | `catalog`    | Built-in categories and the JSON loader, both validated |
//! | `generator`  | `generate_quiz()`: one question per item, randomised options |
//! | `session`    | Answer evaluation, input lock, ticketed auto-advance |
//! | `scoring`    | `rate()`: percentage to star tier |
//! | `controller` | Menu / playing / finished screens plus the cancellable timer |

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod generator;
pub mod models;
pub mod scoring;
pub mod session;
pub mod shuffle;

pub use catalog::Catalog;
pub use config::QuizConfig;
pub use controller::{QuizController, QuizObserver, Screen};
pub use error::QuizError;
pub use generator::generate_quiz;
pub use models::{Category, Item, OptionMark, Progress, Question, Quiz, QuizResult};
pub use scoring::{rate, Tier};
pub use session::{Advance, AdvanceTicket, FeedbackSink, NoFeedback, Session, Submission};
