use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::quiz_engine::{
    error::QuizError,
    models::{Category, Item, Question, Quiz},
    shuffle::{shuffle_in_place, shuffled},
};

/// Options shown per question: the target plus two distractors.
pub const OPTIONS_PER_QUESTION: usize = 3;

/// Smallest pool that can fill every question with distinct options.
pub const MIN_CATEGORY_ITEMS: usize = OPTIONS_PER_QUESTION;

/// Reject pools that cannot fill a question: too few items, or an item id
/// that appears twice.
pub fn ensure_playable(category: &Category) -> Result<(), QuizError> {
    if category.items.len() < MIN_CATEGORY_ITEMS {
        return Err(QuizError::TooFewItems {
            category: category.id.clone(),
            found: category.items.len(),
            required: MIN_CATEGORY_ITEMS,
        });
    }
    let mut seen = HashSet::new();
    for item in &category.items {
        if !seen.insert(item.id.as_str()) {
            return Err(QuizError::DuplicateItemId {
                category: category.id.clone(),
                item: item.id.clone(),
            });
        }
    }
    Ok(())
}

/// Pick the distractors for `target`: a shuffle of every other item, cut to size.
fn distractors<R: Rng + ?Sized>(pool: &[Item], target: &Item, rng: &mut R) -> Vec<Item> {
    let mut others: Vec<Item> = pool.iter().filter(|i| i.id != target.id).cloned().collect();
    shuffle_in_place(&mut others, rng);
    others.truncate(OPTIONS_PER_QUESTION - 1);
    others
}

/// Build one question per category item, in random order.
///
/// Every item is the target exactly once. Each question shows the target and
/// two other items from the same category. The target's slot among the options
/// is randomised per question.
#[tracing::instrument(skip_all, fields(category = %category.id))]
pub fn generate_quiz<R: Rng + ?Sized>(category: &Category, rng: &mut R) -> Result<Quiz, QuizError> {
    ensure_playable(category)?;

    let order = shuffled(&category.items, rng);
    let questions: Vec<Question> = order
        .into_iter()
        .map(|target| {
            let mut options = distractors(&category.items, &target, rng);
            options.push(target.clone());
            shuffle_in_place(&mut options, rng);
            Question { target, options }
        })
        .collect();

    debug!(questions = questions.len(), "quiz generated");

    Ok(Quiz { category_id: category.id.clone(), questions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn category(n: usize) -> Category {
        Category {
            id: "test".into(),
            title: "Test".into(),
            theme_key: "blue".into(),
            icon: "🧪".into(),
            items: (0..n).map(|i| Item::new(format!("i{i}"), format!("word{i}"), "•")).collect(),
        }
    }

    #[test]
    fn two_items_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_quiz(&category(2), &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::TooFewItems { found: 2, required: 3, .. }));
    }

    #[test]
    fn duplicated_item_id_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cat = category(3);
        cat.items[1].id = "i0".into();
        let err = generate_quiz(&cat, &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::DuplicateItemId { ref item, .. } if item == "i0"));
    }

    #[test]
    fn three_items_use_the_other_two_as_distractors() {
        let mut rng = StdRng::seed_from_u64(5);
        let cat = category(3);
        let quiz = generate_quiz(&cat, &mut rng).unwrap();
        for q in &quiz.questions {
            let mut ids: Vec<&str> = q.options.iter().map(|o| o.id.as_str()).collect();
            ids.sort_unstable();
            assert_eq!(ids, ["i0", "i1", "i2"]);
        }
    }

    #[test]
    fn quiz_carries_category_id() {
        let mut rng = StdRng::seed_from_u64(5);
        let quiz = generate_quiz(&category(4), &mut rng).unwrap();
        assert_eq!(quiz.category_id, "test");
        assert_eq!(quiz.len(), 4);
    }
}
