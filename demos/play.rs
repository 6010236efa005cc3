//! Terminal play-through of one quiz.
//!
//! Run with: `cargo run --example play -- [category] [seed]`
//!
//! A simulated player answers each question: it knows the word about two
//! times out of three and guesses otherwise. Feedback, question changes and
//! the final result are printed by a [`QuizObserver`], the same hook a real
//! UI would use to play sounds or throw confetti.
//!
//! Set `RUST_LOG=word_match_quiz=debug` to watch the engine's own events.

use std::sync::Arc;
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use word_match_quiz::{
    view, Catalog, FeedbackSink, Question, QuizConfig, QuizController, QuizError, QuizObserver,
    QuizResult,
};

struct Printer;

impl FeedbackSink for Printer {
    fn on_correct_answer(&self) {
        println!("      Correct! 🎉");
    }
    fn on_wrong_answer(&self) {
        println!("      Oops! 😅");
    }
}

impl QuizObserver for Printer {
    fn on_question_changed(&self, question: &Question) {
        let options: Vec<&str> = question.options.iter().map(|o| o.token.as_str()).collect();
        println!();
        println!("  Which one is \"{}\"?   {}", question.target.label, options.join("  "));
    }

    fn on_session_ended(&self, result: QuizResult) {
        println!();
        println!("  Finished: {result}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), QuizError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("word_match_quiz=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let category_id = args.next().unwrap_or_else(|| "animals".to_string());
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(7);

    let catalog = Catalog::builtin();
    println!("══ WORD HUNTER ══");
    for c in catalog.categories() {
        println!("  {c}");
    }

    let category = catalog.get(&category_id)?.clone();
    let config = QuizConfig { advance_delay_ms: 300, ..QuizConfig::default() }.with_seed(seed);
    let delay = config.advance_delay();
    let mut controller = QuizController::new(config, Arc::new(Printer));
    let mut player = StdRng::seed_from_u64(seed ^ 0x5EED);

    println!();
    println!("══ Mission: {} ══", category.title);
    controller.start(&category)?;

    while let Some(question) = controller.current_question() {
        let pick = if player.gen_bool(0.66) {
            question.target.id.clone()
        } else {
            let i = player.gen_range(0..question.options.len());
            question.options[i].id.clone()
        };
        let token = question.options.iter().find(|o| o.id == pick).map(|o| o.token.as_str());
        println!("    picked {}", token.unwrap_or("?"));
        controller.submit_answer(&pick)?;

        if let Some(progress) = controller.with_session(|s| s.progress()) {
            println!("      {progress}  score {}", controller.with_session(|s| s.score()).unwrap_or(0));
        }
        tokio::time::sleep(delay + Duration::from_millis(50)).await;
    }

    if let Some((result, tier)) = controller.result() {
        let stars = "⭐".repeat(tier.stars() as usize);
        println!("  {}  {stars}", tier.headline());
        println!("  {}", view::result_state(&result));
    }
    Ok(())
}
