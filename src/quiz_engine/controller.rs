//! Top-level driver that owns the screen state and the auto-advance timer.
//!
//! The controller is the only place that holds a [`Session`]. Screen state
//! lives behind an `Arc<Mutex<_>>` so the delayed advance task can reach it.
//! Every start, restart and trip back to the menu aborts the running timer and
//! bumps a generation counter. A timer that fires anyway checks the
//! generation and the session's pending ticket before it touches anything.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::{rngs::StdRng, SeedableRng};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::quiz_engine::{
    config::QuizConfig,
    error::QuizError,
    models::{Category, Question, QuizResult},
    scoring::Tier,
    session::{Advance, AdvanceTicket, FeedbackSink, Session, Submission},
};

/// Everything the presentation layer hears back from a running quiz.
///
/// Feedback fires synchronously inside `submit_answer`. The two session
/// events fire from the timer task, after the screen state is updated.
pub trait QuizObserver: FeedbackSink + Send + Sync {
    fn on_question_changed(&self, _question: &Question) {}
    fn on_session_ended(&self, _result: QuizResult) {}
}

/// Which screen the quiz is on, after the menu / playing / result flow.
#[derive(Debug, Clone)]
pub enum Screen {
    /// Category picker.
    Menu,
    /// A quiz is in progress.
    Playing { category: Category, session: Session },
    /// Score summary for the last quiz.
    Finished { category: Category, result: QuizResult },
}

impl Screen {
    fn category(&self) -> Option<&Category> {
        match self {
            Screen::Menu => None,
            Screen::Playing { category, .. } | Screen::Finished { category, .. } => Some(category),
        }
    }

    fn finish(&mut self, result: QuizResult) {
        if let Screen::Playing { category, .. } = self {
            let category = category.clone();
            *self = Screen::Finished { category, result };
        }
    }
}

struct Shared {
    screen: Screen,
    generation: u64,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

enum Event {
    Question(Question),
    Ended(QuizResult),
}

/// Owns the current session and drives it from user picks and the timer.
pub struct QuizController {
    config: QuizConfig,
    rng: StdRng,
    shared: Arc<Mutex<Shared>>,
    observer: Arc<dyn QuizObserver>,
    timer: Option<JoinHandle<()>>,
}

impl QuizController {
    /// Seeds the quiz RNG from `config.rng_seed`, or from entropy when unset.
    pub fn new(config: QuizConfig, observer: Arc<dyn QuizObserver>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        QuizController {
            config,
            rng,
            shared: Arc::new(Mutex::new(Shared { screen: Screen::Menu, generation: 0 })),
            observer,
            timer: None,
        }
    }

    /// Settings every new session is started with.
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Begin a fresh quiz for `category`, discarding whatever was running.
    ///
    /// On failure the controller is left on the menu.
    pub fn start(&mut self, category: &Category) -> Result<(), QuizError> {
        self.cancel_timer();
        let first = {
            let mut guard = lock(&self.shared);
            guard.generation += 1;
            match Session::start(category, &self.config, &mut self.rng) {
                Ok(session) => {
                    let first = session.current_question().cloned();
                    guard.screen = Screen::Playing { category: category.clone(), session };
                    first
                }
                Err(e) => {
                    warn!(category = %category.id, error = %e, "unable to start quiz");
                    guard.screen = Screen::Menu;
                    return Err(e);
                }
            }
        };
        if let Some(question) = first {
            self.observer.on_question_changed(&question);
        }
        Ok(())
    }

    /// Play the last category again with a newly generated quiz.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        let category = lock(&self.shared)
            .screen
            .category()
            .cloned()
            .ok_or(QuizError::NoActiveSession)?;
        self.start(&category)
    }

    /// Abandon the current quiz and return to the menu.
    pub fn go_home(&mut self) {
        self.cancel_timer();
        let mut guard = lock(&self.shared);
        guard.generation += 1;
        if let Screen::Playing { session, .. } = &mut guard.screen {
            session.invalidate();
            info!(session = %session.label(), "session abandoned");
        }
        guard.screen = Screen::Menu;
    }

    /// Evaluate a pick and schedule the advance to the next question.
    ///
    /// The delay runs on the current Tokio runtime. Without one the pick is
    /// rejected before it is scored.
    pub fn submit_answer(&mut self, option_id: &str) -> Result<Submission, QuizError> {
        let runtime = Handle::try_current().map_err(|_| {
            warn!(option = option_id, "answer rejected, no Tokio runtime");
            QuizError::NoRuntime
        })?;
        let (submission, generation) = {
            let mut guard = lock(&self.shared);
            let generation = guard.generation;
            let submission = match &mut guard.screen {
                Screen::Playing { session, .. } => {
                    session.submit_answer(option_id, self.observer.as_ref())?
                }
                Screen::Finished { .. } => return Err(QuizError::SessionEnded),
                Screen::Menu => return Err(QuizError::NoActiveSession),
            };
            (submission, generation)
        };
        if let Submission::Evaluated { ticket, .. } = submission {
            self.schedule_advance(&runtime, ticket, generation);
        }
        Ok(submission)
    }

    /// Snapshot of the current screen.
    pub fn screen(&self) -> Screen {
        lock(&self.shared).screen.clone()
    }

    /// True while a quiz is on screen.
    pub fn is_playing(&self) -> bool {
        matches!(lock(&self.shared).screen, Screen::Playing { .. })
    }

    /// The question on screen, if a quiz is in progress.
    pub fn current_question(&self) -> Option<Question> {
        self.with_session(|s| s.current_question().cloned()).flatten()
    }

    /// The word to hand to the presentation layer's own speech output.
    pub fn current_word(&self) -> Option<String> {
        self.current_question().map(|q| q.target.label)
    }

    /// Run `f` against the live session, if a quiz is in progress.
    pub fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> Option<T> {
        match &lock(&self.shared).screen {
            Screen::Playing { session, .. } => Some(f(session)),
            _ => None,
        }
    }

    /// Final score and its rating, once the quiz has finished.
    pub fn result(&self) -> Option<(QuizResult, Tier)> {
        match lock(&self.shared).screen {
            Screen::Finished { result, .. } => result.rate().ok().map(|tier| (result, tier)),
            _ => None,
        }
    }

    fn schedule_advance(&mut self, runtime: &Handle, ticket: AdvanceTicket, generation: u64) {
        let shared = Arc::clone(&self.shared);
        let observer = Arc::clone(&self.observer);
        let delay = self.config.advance_delay();
        self.timer = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            fire_advance(&shared, observer.as_ref(), generation, ticket);
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Drop for QuizController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

fn fire_advance(
    shared: &Mutex<Shared>,
    observer: &dyn QuizObserver,
    generation: u64,
    ticket: AdvanceTicket,
) {
    let event = {
        let mut guard = lock(shared);
        if guard.generation != generation {
            debug!(generation, current = guard.generation, "advance from replaced session dropped");
            return;
        }
        let outcome = match &mut guard.screen {
            Screen::Playing { session, .. } => session.advance(ticket),
            _ => Advance::Stale,
        };
        match outcome {
            Advance::Next { .. } => match &guard.screen {
                Screen::Playing { session, .. } => session.current_question().cloned().map(Event::Question),
                _ => None,
            },
            Advance::Ended(result) => {
                guard.screen.finish(result);
                Some(Event::Ended(result))
            }
            Advance::Stale => None,
        }
    };

    match event {
        Some(Event::Question(question)) => observer.on_question_changed(&question),
        Some(Event::Ended(result)) => observer.on_session_ended(result),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::quiz_engine::models::Item;

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Correct,
        Wrong,
        Question(String),
        Ended(QuizResult),
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Seen>>,
    }

    impl Recorder {
        fn push(&self, e: Seen) {
            self.events.lock().unwrap().push(e);
        }
        fn events(&self) -> Vec<Seen> {
            self.events.lock().unwrap().clone()
        }
        fn ended(&self) -> Vec<QuizResult> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    Seen::Ended(r) => Some(r),
                    _ => None,
                })
                .collect()
        }
    }

    impl FeedbackSink for Recorder {
        fn on_correct_answer(&self) {
            self.push(Seen::Correct);
        }
        fn on_wrong_answer(&self) {
            self.push(Seen::Wrong);
        }
    }

    impl QuizObserver for Recorder {
        fn on_question_changed(&self, q: &Question) {
            self.push(Seen::Question(q.target.id.clone()));
        }
        fn on_session_ended(&self, r: QuizResult) {
            self.push(Seen::Ended(r));
        }
    }

    fn abc() -> Category {
        Category {
            id: "abc".into(),
            title: "ABC".into(),
            theme_key: "green".into(),
            icon: "🔤".into(),
            items: vec![Item::new("a", "A", "🅰"), Item::new("b", "B", "🅱"), Item::new("c", "C", "©")],
        }
    }

    fn controller(rec: &Arc<Recorder>) -> QuizController {
        QuizController::new(QuizConfig::default().with_seed(11), rec.clone())
    }

    /// Sleep past the auto-advance delay.
    async fn wait_for_advance() {
        tokio::time::sleep(Duration::from_millis(1600)).await;
    }

    fn wrong_option(q: &Question) -> String {
        q.options.iter().find(|o| o.id != q.target.id).unwrap().id.clone()
    }

    #[tokio::test(start_paused = true)]
    async fn advance_waits_for_the_delay() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        ctl.start(&abc()).unwrap();
        let first = ctl.current_question().unwrap();
        ctl.submit_answer(&first.target.id).unwrap();

        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(ctl.with_session(|s| s.index()), Some(0));
        assert_eq!(ctl.with_session(|s| s.is_locked()), Some(true));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(ctl.with_session(|s| s.index()), Some(1));
        assert_eq!(ctl.with_session(|s| s.selection().map(str::to_owned)), Some(None));
    }

    #[tokio::test(start_paused = true)]
    async fn perfect_run_ends_with_three_stars() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        ctl.start(&abc()).unwrap();
        while let Some(q) = ctl.current_question() {
            ctl.submit_answer(&q.target.id).unwrap();
            wait_for_advance().await;
        }
        let expected = QuizResult { score: 30, total: 30 };
        assert_eq!(ctl.result(), Some((expected, Tier::ThreeStars)));
        assert_eq!(rec.ended(), vec![expected]);
        let events = rec.events();
        assert_eq!(events.iter().filter(|e| **e == Seen::Correct).count(), 3);
        assert_eq!(events.iter().filter(|e| matches!(e, Seen::Question(_))).count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn two_of_three_rates_two_stars() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        ctl.start(&abc()).unwrap();
        let mut n = 0;
        while let Some(q) = ctl.current_question() {
            let pick = if n == 1 { wrong_option(&q) } else { q.target.id.clone() };
            ctl.submit_answer(&pick).unwrap();
            wait_for_advance().await;
            n += 1;
        }
        assert_eq!(ctl.result(), Some((QuizResult { score: 20, total: 30 }, Tier::TwoStars)));
        assert_eq!(rec.events().iter().filter(|e| **e == Seen::Wrong).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_double_tap_scores_once() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        ctl.start(&abc()).unwrap();
        let q = ctl.current_question().unwrap();
        ctl.submit_answer(&q.target.id).unwrap();
        assert_eq!(ctl.submit_answer(&q.target.id).unwrap(), Submission::Ignored);
        assert_eq!(ctl.with_session(|s| s.score()), Some(10));
        wait_for_advance().await;
        assert_eq!(ctl.with_session(|s| s.index()), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_timer_cannot_touch_the_next_session() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        ctl.start(&abc()).unwrap();
        let q = ctl.current_question().unwrap();
        ctl.submit_answer(&q.target.id).unwrap();

        ctl.go_home();
        assert!(matches!(ctl.screen(), Screen::Menu));
        ctl.start(&abc()).unwrap();
        wait_for_advance().await;

        assert_eq!(ctl.with_session(|s| (s.index(), s.score(), s.is_locked())), Some((0, 0, false)));
        assert!(rec.ended().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_is_ignored_even_if_not_aborted() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        ctl.start(&abc()).unwrap();
        let q = ctl.current_question().unwrap();
        let Submission::Evaluated { ticket, .. } = ctl.submit_answer(&q.target.id).unwrap() else {
            panic!("expected evaluation");
        };
        let old_generation = lock(&ctl.shared).generation;
        ctl.start(&abc()).unwrap();

        fire_advance(&ctl.shared, rec.as_ref(), old_generation, ticket);
        assert_eq!(ctl.with_session(|s| s.index()), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replays_same_category() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        ctl.start(&abc()).unwrap();
        while let Some(q) = ctl.current_question() {
            let wrong = wrong_option(&q);
            ctl.submit_answer(&wrong).unwrap();
            wait_for_advance().await;
        }
        assert_eq!(ctl.result(), Some((QuizResult { score: 0, total: 30 }, Tier::NoStars)));

        ctl.restart().unwrap();
        assert!(ctl.is_playing());
        assert_eq!(ctl.with_session(|s| (s.quiz().category_id.clone(), s.score())), Some(("abc".to_string(), 0)));
    }

    #[test]
    fn answer_without_runtime_is_rejected_before_scoring() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        ctl.start(&abc()).unwrap();
        let q = ctl.current_question().unwrap();

        assert!(matches!(ctl.submit_answer(&q.target.id), Err(QuizError::NoRuntime)));
        assert_eq!(ctl.with_session(|s| (s.score(), s.is_locked())), Some((0, false)));
        assert!(!rec.events().contains(&Seen::Correct));

        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let sub = rt.block_on(async { ctl.submit_answer(&q.target.id) }).unwrap();
        assert!(matches!(sub, Submission::Evaluated { correct: true, .. }));
    }

    #[tokio::test]
    async fn misuse_surfaces_errors() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        assert!(matches!(ctl.submit_answer("a"), Err(QuizError::NoActiveSession)));
        assert!(matches!(ctl.restart(), Err(QuizError::NoActiveSession)));

        let mut tiny = abc();
        tiny.items.pop();
        assert!(matches!(ctl.start(&tiny), Err(QuizError::TooFewItems { .. })));
        assert!(matches!(ctl.screen(), Screen::Menu));
    }

    #[tokio::test]
    async fn current_word_is_the_target_label() {
        let rec = Arc::new(Recorder::default());
        let mut ctl = controller(&rec);
        assert_eq!(ctl.current_word(), None);
        ctl.start(&abc()).unwrap();
        let q = ctl.current_question().unwrap();
        assert_eq!(ctl.current_word(), Some(q.target.label));
    }
}
