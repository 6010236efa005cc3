use std::fmt;
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{error::QuizError, models::QuizResult};

/// End-of-quiz rating shown as 0 to 3 stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    NoStars,
    OneStar,
    TwoStars,
    ThreeStars,
}

impl Tier {
    pub fn stars(self) -> u8 {
        match self {
            Tier::NoStars    => 0,
            Tier::OneStar    => 1,
            Tier::TwoStars   => 2,
            Tier::ThreeStars => 3,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Tier::ThreeStars => "Amazing!",
            Tier::TwoStars   => "Great Job!",
            Tier::OneStar | Tier::NoStars => "Good Try!",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline())
    }
}

/// Score as a percentage of `total`.
pub fn percentage(score: u32, total: u32) -> Result<f64, QuizError> {
    if total == 0 {
        return Err(QuizError::ZeroTotal);
    }
    Ok(score as f64 / total as f64 * 100.0)
}

/// Map a final score onto a star tier.
///
/// | Percentage  | Tier       |
/// |-------------|------------|
/// | 100 or more | ThreeStars |
/// | 60 to <100  | TwoStars   |
/// | >0 to <60   | OneStar    |
/// | 0           | NoStars    |
pub fn rate(score: u32, total: u32) -> Result<Tier, QuizError> {
    let pct = percentage(score, total)?;
    let tier = if pct >= 100.0 {
        Tier::ThreeStars
    } else if pct >= 60.0 {
        Tier::TwoStars
    } else if pct > 0.0 {
        Tier::OneStar
    } else {
        Tier::NoStars
    };
    Ok(tier)
}

impl QuizResult {
    pub fn percentage(&self) -> Result<f64, QuizError> {
        percentage(self.score, self.total)
    }

    pub fn rate(&self) -> Result<Tier, QuizError> {
        rate(self.score, self.total)
    }
}
