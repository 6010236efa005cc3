use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Catalog primitives
// ---------------------------------------------------------------------------

/// One matchable entry: a display word and the glyph that pictures it.
///
/// Identity is `id` only. Two items with the same label but different ids are
/// different items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub label: String,
    pub token: String,
}

impl Item {
    pub fn new(id: impl Into<String>, label: impl Into<String>, token: impl Into<String>) -> Self {
        Item { id: id.into(), label: label.into(), token: token.into() }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.token, self.label)
    }
}

/// A themed word list, as shown on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    /// Opaque key the presentation layer maps to a color scheme.
    pub theme_key: String,
    pub icon: String,
    pub items: Vec<Item>,
}

impl Category {
    pub fn word_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} words)", self.icon, self.title, self.items.len())
    }
}

// ---------------------------------------------------------------------------
// Quiz types
// ---------------------------------------------------------------------------

/// One word to match against its picture and two distractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub target: Item,
    /// Target plus distractors, in display order.
    pub options: Vec<Item>,
}

impl Question {
    pub fn is_correct(&self, option_id: &str) -> bool {
        self.target.id == option_id
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    /// Position of the target among the displayed options.
    pub fn target_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.id == self.target.id)
    }
}

/// Ordered questions for one full pass over a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub category_id: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

/// Final score handed from a finished session to the summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
}

impl fmt::Display for QuizResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.score, self.total)
    }
}

// ---------------------------------------------------------------------------
// Session read models
// ---------------------------------------------------------------------------

/// Where the player is in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Zero-based index of the question on screen.
    pub index: usize,
    pub total: usize,
    /// Share of questions already behind the player, 0..100.
    pub percent: f64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {} of {}", self.index + 1, self.total)
    }
}

/// How an option should be shown once the question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionMark {
    Unanswered,
    Correct,
    WrongPick,
    Dimmed,
}

impl fmt::Display for OptionMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionMark::Unanswered => write!(f, "unanswered"),
            OptionMark::Correct    => write!(f, "correct"),
            OptionMark::WrongPick  => write!(f, "wrong"),
            OptionMark::Dimmed     => write!(f, "dimmed"),
        }
    }
}
