//! Category sources: the built-in word lists and a JSON loader.
//!
//! Every category that leaves this module has passed [`validate`]: it has
//! enough items to build questions and no duplicate item ids.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::quiz_engine::{
    error::QuizError,
    generator::ensure_playable,
    models::{Category, Item},
};

/// Validated set of categories to choose from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, rejecting any category the generator could not use.
    pub fn new(categories: Vec<Category>) -> Result<Self, QuizError> {
        if categories.is_empty() {
            return Err(QuizError::EmptyCatalog);
        }
        for category in &categories {
            validate(category)?;
        }
        Ok(Catalog { categories })
    }

    /// Parse a JSON array of categories.
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        let catalog = Catalog::new(categories)?;
        debug!(categories = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn builtin() -> Self {
        Catalog { categories: builtin_categories() }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Result<&Category, QuizError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| QuizError::UnknownCategory(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Check that a category can be turned into a quiz.
pub fn validate(category: &Category) -> Result<(), QuizError> {
    ensure_playable(category)
}

fn category(id: &str, title: &str, theme_key: &str, icon: &str, words: &[(&str, &str)]) -> Category {
    Category {
        id: id.to_string(),
        title: title.to_string(),
        theme_key: theme_key.to_string(),
        icon: icon.to_string(),
        items: words
            .iter()
            .map(|(label, token)| Item::new(format!("{id}-{}", label.to_lowercase()), *label, *token))
            .collect(),
    }
}

fn builtin_categories() -> Vec<Category> {
    vec![
        category("animals", "Animals", "blue", "🦁", &[
            ("Cat", "🐱"), ("Dog", "🐶"), ("Lion", "🦁"), ("Monkey", "🐵"),
            ("Elephant", "🐘"), ("Frog", "🐸"), ("Pig", "🐷"), ("Rabbit", "🐰"),
        ]),
        category("fruits", "Fruits", "red", "🍎", &[
            ("Apple", "🍎"), ("Banana", "🍌"), ("Grapes", "🍇"), ("Lemon", "🍋"),
            ("Cherry", "🍒"), ("Strawberry", "🍓"), ("Watermelon", "🍉"),
        ]),
        category("nature", "Nature", "green", "🌳", &[
            ("Tree", "🌳"), ("Flower", "🌸"), ("Sun", "☀️"), ("Moon", "🌙"),
            ("Star", "⭐"), ("Cloud", "☁️"), ("Rainbow", "🌈"),
        ]),
        category("food", "Food", "amber", "🍕", &[
            ("Pizza", "🍕"), ("Burger", "🍔"), ("Bread", "🍞"), ("Cheese", "🧀"),
            ("Egg", "🥚"), ("Cake", "🍰"), ("Cookie", "🍪"),
        ]),
        category("vehicles", "Vehicles", "purple", "🚗", &[
            ("Car", "🚗"), ("Bus", "🚌"), ("Train", "🚆"), ("Plane", "✈️"),
            ("Boat", "⛵"), ("Bicycle", "🚲"), ("Rocket", "🚀"),
        ]),
    ]
}
