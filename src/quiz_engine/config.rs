use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Points added for each correctly matched word.
pub const POINTS_PER_CORRECT: u32 = 10;

/// Pause between an answer and the next question, so the feedback stays visible.
pub const ADVANCE_DELAY_MS: u64 = 1500;

/// Tunables for a quiz session.
///
/// Every field has a default, so a partial JSON object such as
/// `{"rng_seed": 7}` deserializes into a usable config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub points_per_correct: u32,
    pub advance_delay_ms: u64,
    /// `Some` makes quiz order and option layout reproducible.
    pub rng_seed: Option<u64>,
}

impl QuizConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            points_per_correct: POINTS_PER_CORRECT,
            advance_delay_ms: ADVANCE_DELAY_MS,
            rng_seed: None,
        }
    }
}
