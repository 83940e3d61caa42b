//! Timed hit-window engine
//!
//! Drives one delivery at a time: the ball crosses the pitch over a fixed
//! duration, a hit is accepted only while the ball is inside the hit band,
//! and an unhit ball costs a wicket. Every timer the engine arms is tagged
//! with the delivery sequence number current when it was armed; a timer whose
//! tag no longer matches is dropped instead of fired.

use super::clock::{Clock, Monotonic};
use super::runs::{RunSource, TableDraw, run_label};
use super::state::{DeliveryOutcome, Feedback, FeedbackTone, GameEvent, GameState, GameStatus};
use super::MiniGame;
use crate::settings::EngineConfig;

/// Text shown when a wicket falls
pub const MISS_LABEL: &str = "MISS! 🏏";

/// A ball in flight
#[derive(Debug, Clone, Copy)]
struct Delivery {
    seq: u64,
    started_ms: f64,
}

/// A one-shot timer owned by whatever armed it
#[derive(Debug, Clone, Copy)]
struct Timer {
    tag: u64,
    due_ms: f64,
}

type CoinSink = Box<dyn FnMut(u32)>;

/// Timed-reaction cricket engine
pub struct CricketEngine<C: Clock, R: RunSource = TableDraw> {
    state: GameState,
    config: EngineConfig,
    clock: C,
    monotonic: Monotonic,
    runs: R,
    on_coins: Option<CoinSink>,
    /// Bumped on every new delivery and on reset
    seq: u64,
    delivery: Option<Delivery>,
    idle_timer: Option<Timer>,
    /// Tagged with the feedback key it clears
    feedback_timer: Option<Timer>,
    feedback_key: u64,
    events: Vec<GameEvent>,
}

impl<C: Clock> CricketEngine<C, TableDraw> {
    /// Engine with default tuning and a seeded draw over `RUN_TABLE`
    pub fn new(clock: C, seed: u64) -> Self {
        Self::with_parts(clock, TableDraw::new(seed), EngineConfig::default())
    }
}

impl<C: Clock, R: RunSource> CricketEngine<C, R> {
    pub fn with_parts(clock: C, runs: R, config: EngineConfig) -> Self {
        let config = config.validated();
        let mut monotonic = Monotonic::default();
        monotonic.observe(clock.now_ms());
        Self {
            state: GameState::with_wickets(config.max_wickets),
            config,
            clock,
            monotonic,
            runs,
            on_coins: None,
            seq: 0,
            delivery: None,
            idle_timer: None,
            feedback_timer: None,
            feedback_key: 0,
            events: Vec::new(),
        }
    }

    /// Register the wallet callback, called once per resolved hit
    pub fn on_coins_earned(&mut self, sink: impl FnMut(u32) + 'static) {
        self.on_coins = Some(Box::new(sink));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// True while a delivery timer is armed
    pub fn delivery_in_flight(&self) -> bool {
        self.delivery.is_some()
    }

    /// Current delivery sequence number
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn now(&mut self) -> f64 {
        self.monotonic.observe(self.clock.now_ms())
    }

    /// Bowl a new ball. Ignored while bowling or after game over.
    pub fn start_delivery(&mut self) {
        if !self.state.status.can_bowl() {
            return;
        }
        let now = self.now();

        self.seq += 1;
        // A Hit/Miss display timer from the previous ball must not fire mid-delivery
        self.idle_timer = None;
        self.delivery = Some(Delivery {
            seq: self.seq,
            started_ms: now,
        });

        self.state.status = GameStatus::Bowling;
        self.state.ball_progress = 0.0;
        self.state.hit_window_open = false;
        self.state.last_outcome = None;
        self.events.push(GameEvent::DeliveryStarted);
        log::debug!("Delivery {} started at {:.0}ms", self.seq, now);
    }

    /// Advance the ball and fire due timers. Call once per animation frame.
    pub fn tick(&mut self) {
        let now = self.now();
        self.advance_delivery(now);
        self.fire_timers(now);
    }

    /// Swing the bat. Counts only while the hit window is open.
    pub fn attempt_hit(&mut self) {
        if self.state.status != GameStatus::Bowling {
            return;
        }
        // Judge the swing at its own timestamp, not at the last frame's
        let now = self.now();
        self.advance_delivery(now);
        if self.state.status != GameStatus::Bowling || !self.state.hit_window_open {
            return;
        }

        self.delivery = None;
        self.set_window(false);

        let runs = self.runs.next_run();
        let earned = runs.saturating_mul(self.config.coins_per_run);
        self.state.score = self.state.score.saturating_add(runs);
        self.state.session_coins = self.state.session_coins.saturating_add(earned);
        self.state.last_outcome = Some(DeliveryOutcome::Runs(runs));
        if let Some(sink) = self.on_coins.as_mut() {
            sink(earned);
        }

        self.raise_feedback(run_label(runs), FeedbackTone::for_runs(runs), now);
        self.state.status = GameStatus::Hit;
        self.idle_timer = Some(Timer {
            tag: self.seq,
            due_ms: now + self.config.display_delay_ms,
        });
        self.events.push(GameEvent::Hit {
            runs,
            coins: earned,
        });
        log::debug!(
            "Delivery {} hit for {} (+{} coins, session {})",
            self.seq,
            runs,
            earned,
            self.state.session_coins
        );
    }

    /// Return every field to its initial value and drop all pending timers
    pub fn reset(&mut self) {
        self.seq += 1;
        self.delivery = None;
        self.idle_timer = None;
        self.feedback_timer = None;
        self.state = GameState::with_wickets(self.config.max_wickets);
        self.events.push(GameEvent::Reset);
        log::info!("Cricket session reset");
    }

    fn advance_delivery(&mut self, now: f64) {
        let Some(delivery) = self.delivery else {
            return;
        };
        if delivery.seq != self.seq {
            self.delivery = None;
            return;
        }

        let elapsed = now - delivery.started_ms;
        let progress = (elapsed / self.config.delivery_ms).clamp(0.0, 1.0) as f32;
        self.state.ball_progress = progress;

        if progress >= 1.0 {
            self.delivery = None;
            self.set_window(false);
            let ended_at = delivery.started_ms + self.config.delivery_ms;
            self.resolve_miss(ended_at.min(now));
            return;
        }

        self.set_window(self.config.in_hit_window(progress));
    }

    fn set_window(&mut self, open: bool) {
        if self.state.hit_window_open == open {
            return;
        }
        self.state.hit_window_open = open;
        self.events.push(if open {
            GameEvent::WindowOpened
        } else {
            GameEvent::WindowClosed
        });
    }

    fn resolve_miss(&mut self, at: f64) {
        self.state.hit_window_open = false;
        self.state.wickets_remaining = self.state.wickets_remaining.saturating_sub(1);
        self.state.last_outcome = Some(DeliveryOutcome::Out);
        self.raise_feedback(MISS_LABEL.to_string(), FeedbackTone::Miss, at);

        let wickets_remaining = self.state.wickets_remaining;
        self.events.push(GameEvent::Miss { wickets_remaining });

        if wickets_remaining == 0 {
            self.state.status = GameStatus::GameOver;
            self.idle_timer = None;
            self.events.push(GameEvent::GameOver);
            log::info!(
                "Game over: {} runs, {} coins",
                self.state.score,
                self.state.session_coins
            );
        } else {
            self.state.status = GameStatus::Miss;
            self.idle_timer = Some(Timer {
                tag: self.seq,
                due_ms: at + self.config.display_delay_ms,
            });
            log::debug!("Delivery {} missed, {} wickets left", self.seq, wickets_remaining);
        }
    }

    fn raise_feedback(&mut self, text: String, tone: FeedbackTone, at: f64) {
        self.feedback_key += 1;
        self.state.feedback = Some(Feedback {
            text,
            tone,
            key: self.feedback_key,
        });
        self.feedback_timer = Some(Timer {
            tag: self.feedback_key,
            due_ms: at + self.config.feedback_ms,
        });
    }

    fn fire_timers(&mut self, now: f64) {
        if let Some(timer) = self.idle_timer {
            if now >= timer.due_ms {
                self.idle_timer = None;
                let showing_result =
                    matches!(self.state.status, GameStatus::Hit | GameStatus::Miss);
                if timer.tag == self.seq && showing_result && self.state.wickets_remaining > 0 {
                    self.state.status = GameStatus::Idle;
                    self.events.push(GameEvent::ReturnedToIdle);
                }
            }
        }

        if let Some(timer) = self.feedback_timer {
            if now >= timer.due_ms {
                self.feedback_timer = None;
                if self.state.feedback.as_ref().map(|f| f.key) == Some(timer.tag) {
                    self.state.feedback = None;
                }
            }
        }
    }
}

impl<C: Clock, R: RunSource> MiniGame for CricketEngine<C, R> {
    fn tick(&mut self) {
        CricketEngine::tick(self);
    }

    fn restart(&mut self) {
        self.reset();
    }

    fn is_over(&self) -> bool {
        self.state.is_game_over()
    }

    fn score(&self) -> u32 {
        self.state.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{ManualClock, RUN_TABLE, ScriptedRuns};
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Mid-window offset from delivery start (50% of 2200ms)
    const MID_WINDOW_MS: f64 = 1100.0;

    type TestEngine = CricketEngine<ManualClock, ScriptedRuns>;

    fn engine_with(runs: &[u32]) -> (TestEngine, ManualClock, Rc<RefCell<Vec<u32>>>) {
        let clock = ManualClock::starting_at(10_000.0);
        let mut engine = CricketEngine::with_parts(
            clock.clone(),
            ScriptedRuns::new(runs.iter().copied()),
            EngineConfig::default(),
        );
        let earned = Rc::new(RefCell::new(Vec::new()));
        let sink = earned.clone();
        engine.on_coins_earned(move |n| sink.borrow_mut().push(n));
        (engine, clock, earned)
    }

    fn step(engine: &mut TestEngine, clock: &ManualClock, ms: f64) {
        clock.advance(ms);
        engine.tick();
    }

    fn miss_one(engine: &mut TestEngine, clock: &ManualClock) {
        engine.start_delivery();
        step(engine, clock, DELIVERY_MS);
    }

    #[test]
    fn test_start_delivery_from_idle() {
        let (mut engine, _clock, _) = engine_with(&[]);
        engine.start_delivery();

        let state = engine.state();
        assert_eq!(state.status, GameStatus::Bowling);
        assert_eq!(state.ball_progress, 0.0);
        assert!(!state.hit_window_open);
        assert!(engine.delivery_in_flight());
        assert_eq!(engine.drain_events(), vec![GameEvent::DeliveryStarted]);
    }

    #[test]
    fn test_progress_and_hit_window() {
        let (mut engine, clock, _) = engine_with(&[]);
        engine.start_delivery();

        step(&mut engine, &clock, 550.0);
        assert!((engine.state().ball_progress - 0.25).abs() < 1e-4);
        assert!(!engine.state().hit_window_open);

        step(&mut engine, &clock, 210.0); // 760ms, just before the band
        assert!(!engine.state().hit_window_open);

        step(&mut engine, &clock, 20.0); // 780ms
        assert!(engine.state().hit_window_open);

        step(&mut engine, &clock, 640.0); // 1420ms
        assert!(engine.state().hit_window_open);

        step(&mut engine, &clock, 20.0); // 1440ms
        assert!(!engine.state().hit_window_open);
        assert_eq!(engine.state().status, GameStatus::Bowling);
    }

    #[test]
    fn test_hit_outside_window_is_noop() {
        let (mut engine, clock, earned) = engine_with(&[6]);
        engine.start_delivery();

        step(&mut engine, &clock, 300.0);
        let before = engine.state().clone();
        engine.attempt_hit();
        engine.attempt_hit();
        assert_eq!(engine.state(), &before);

        step(&mut engine, &clock, 1300.0); // 1600ms, past the band
        let before = engine.state().clone();
        engine.attempt_hit();
        assert_eq!(engine.state(), &before);
        assert!(earned.borrow().is_empty());
    }

    #[test]
    fn test_hit_when_not_bowling_is_noop() {
        let (mut engine, _clock, earned) = engine_with(&[6]);
        let before = engine.state().clone();
        engine.attempt_hit();
        assert_eq!(engine.state(), &before);
        assert!(earned.borrow().is_empty());
    }

    #[test]
    fn test_hit_six_awards_twelve_coins() {
        let (mut engine, clock, earned) = engine_with(&[6]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        engine.attempt_hit();

        let state = engine.state();
        assert_eq!(state.status, GameStatus::Hit);
        assert_eq!(state.score, 6);
        assert_eq!(state.session_coins, 12);
        assert_eq!(state.last_outcome, Some(DeliveryOutcome::Runs(6)));
        assert!(!state.hit_window_open);
        assert!(!engine.delivery_in_flight());
        assert_eq!(*earned.borrow(), vec![12]);

        let feedback = state.feedback.as_ref().unwrap();
        assert_eq!(feedback.text, "6! 🚀");
        assert_eq!(feedback.tone, FeedbackTone::Six);

        step(&mut engine, &clock, DISPLAY_DELAY_MS - 1.0);
        assert_eq!(engine.state().status, GameStatus::Hit);
        step(&mut engine, &clock, 1.0);
        assert_eq!(engine.state().status, GameStatus::Idle);
        assert_eq!(engine.state().wickets_remaining, MAX_WICKETS);
    }

    #[test]
    fn test_double_hit_awards_once() {
        let (mut engine, clock, earned) = engine_with(&[4, 6]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        engine.attempt_hit();
        engine.attempt_hit();

        assert_eq!(engine.state().score, 4);
        assert_eq!(engine.state().session_coins, 8);
        assert_eq!(*earned.borrow(), vec![8]);

        // The cancelled delivery must not come back as a miss
        step(&mut engine, &clock, DELIVERY_MS * 2.0);
        assert_eq!(engine.state().wickets_remaining, MAX_WICKETS);
        assert_eq!(engine.state().status, GameStatus::Idle);
    }

    #[test]
    fn test_timeout_resolves_miss() {
        let (mut engine, clock, earned) = engine_with(&[]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        step(&mut engine, &clock, DELIVERY_MS - MID_WINDOW_MS - 1.0);
        assert_eq!(engine.state().status, GameStatus::Bowling);

        step(&mut engine, &clock, 1.0);
        let state = engine.state();
        assert_eq!(state.status, GameStatus::Miss);
        assert_eq!(state.ball_progress, 1.0);
        assert_eq!(state.wickets_remaining, MAX_WICKETS - 1);
        assert_eq!(state.last_outcome, Some(DeliveryOutcome::Out));
        assert_eq!(state.feedback.as_ref().unwrap().text, MISS_LABEL);
        assert!(!engine.delivery_in_flight());
        assert!(earned.borrow().is_empty());

        step(&mut engine, &clock, DISPLAY_DELAY_MS);
        assert_eq!(engine.state().status, GameStatus::Idle);
        assert_eq!(engine.state().wickets_remaining, MAX_WICKETS - 1);
    }

    #[test]
    fn test_three_misses_game_over() {
        let (mut engine, clock, _) = engine_with(&[]);
        for expected in [2, 1] {
            miss_one(&mut engine, &clock);
            assert_eq!(engine.state().wickets_remaining, expected);
            assert_eq!(engine.state().status, GameStatus::Miss);
            step(&mut engine, &clock, DISPLAY_DELAY_MS);
        }
        miss_one(&mut engine, &clock);

        assert_eq!(engine.state().status, GameStatus::GameOver);
        assert_eq!(engine.state().wickets_remaining, 0);
        assert_eq!(engine.state().score, 0);
        assert!(engine.is_over());

        // Terminal: no auto-recovery, no new deliveries
        step(&mut engine, &clock, 10_000.0);
        engine.start_delivery();
        engine.attempt_hit();
        assert_eq!(engine.state().status, GameStatus::GameOver);
        assert_eq!(engine.state().wickets_remaining, 0);
    }

    #[test]
    fn test_bowl_straight_from_miss_display() {
        let (mut engine, clock, _) = engine_with(&[]);
        miss_one(&mut engine, &clock);
        assert_eq!(engine.state().status, GameStatus::Miss);
        engine.start_delivery();
        assert_eq!(engine.state().status, GameStatus::Bowling);
        assert!(engine.state().last_outcome.is_none());
    }

    #[test]
    fn test_reset_from_game_over() {
        let (mut engine, clock, _) = engine_with(&[3]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        engine.attempt_hit();
        step(&mut engine, &clock, DISPLAY_DELAY_MS);
        for _ in 0..3 {
            miss_one(&mut engine, &clock);
            step(&mut engine, &clock, DISPLAY_DELAY_MS);
        }
        assert_eq!(engine.state().status, GameStatus::GameOver);
        assert_eq!(engine.state().score, 3);

        engine.reset();
        let state = engine.state();
        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.session_coins, 0);
        assert_eq!(state.wickets_remaining, MAX_WICKETS);
        assert!(state.last_outcome.is_none());
        assert!(state.feedback.is_none());
    }

    #[test]
    fn test_reset_cancels_in_flight_delivery() {
        let (mut engine, clock, _) = engine_with(&[]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        engine.reset();
        engine.drain_events();

        step(&mut engine, &clock, DELIVERY_MS * 3.0);
        assert_eq!(engine.state().status, GameStatus::Idle);
        assert_eq!(engine.state().wickets_remaining, MAX_WICKETS);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_new_delivery_drops_stale_idle_timer() {
        let (mut engine, clock, _) = engine_with(&[2]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        engine.attempt_hit();
        let first_seq = engine.sequence();

        // Bowl again while the Hit display timer is still pending
        step(&mut engine, &clock, 100.0);
        engine.start_delivery();
        assert!(engine.sequence() > first_seq);

        step(&mut engine, &clock, DISPLAY_DELAY_MS);
        assert_eq!(engine.state().status, GameStatus::Bowling);
        assert!(engine.delivery_in_flight());
    }

    #[test]
    fn test_start_while_bowling_is_rejected() {
        let (mut engine, clock, _) = engine_with(&[]);
        engine.start_delivery();
        let seq = engine.sequence();
        step(&mut engine, &clock, 1000.0);

        engine.start_delivery();
        assert_eq!(engine.sequence(), seq);
        step(&mut engine, &clock, 100.0);
        assert!((engine.state().ball_progress - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_late_swing_judged_at_its_own_time() {
        let (mut engine, clock, earned) = engine_with(&[6]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        assert!(engine.state().hit_window_open);

        // No frame between the last tick and the swing
        clock.advance(500.0);
        engine.attempt_hit();
        assert_eq!(engine.state().status, GameStatus::Bowling);
        assert!(!engine.state().hit_window_open);
        assert!(earned.borrow().is_empty());
    }

    #[test]
    fn test_swing_after_timeout_counts_as_miss() {
        let (mut engine, clock, earned) = engine_with(&[6]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        clock.advance(DELIVERY_MS);
        engine.attempt_hit();

        assert_eq!(engine.state().status, GameStatus::Miss);
        assert_eq!(engine.state().wickets_remaining, MAX_WICKETS - 1);
        assert!(earned.borrow().is_empty());
    }

    #[test]
    fn test_late_swing_on_last_wicket_ends_game() {
        let (mut engine, clock, earned) = engine_with(&[6]);
        for _ in 0..MAX_WICKETS - 1 {
            miss_one(&mut engine, &clock);
            step(&mut engine, &clock, DISPLAY_DELAY_MS);
        }
        assert_eq!(engine.state().wickets_remaining, 1);

        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        clock.advance(DELIVERY_MS);
        engine.attempt_hit();

        assert_eq!(engine.state().status, GameStatus::GameOver);
        assert_eq!(engine.state().wickets_remaining, 0);
        assert!(!engine.delivery_in_flight());
        assert!(earned.borrow().is_empty());

        // No display timer brings it back
        step(&mut engine, &clock, DISPLAY_DELAY_MS);
        assert_eq!(engine.state().status, GameStatus::GameOver);
    }

    #[test]
    fn test_feedback_clears_after_duration() {
        let (mut engine, clock, _) = engine_with(&[1, 2]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        engine.attempt_hit();
        let first_key = engine.state().feedback.as_ref().unwrap().key;

        step(&mut engine, &clock, FEEDBACK_MS - 1.0);
        assert!(engine.state().feedback.is_some());
        step(&mut engine, &clock, 1.0);
        assert!(engine.state().feedback.is_none());

        // A newer popup outlives the older popup's timer
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        engine.attempt_hit();
        let second = engine.state().feedback.clone().unwrap();
        assert!(second.key > first_key);
        assert_eq!(second.text, "2 Runs!");
    }

    #[test]
    fn test_event_stream_for_one_hit() {
        let (mut engine, clock, _) = engine_with(&[4]);
        engine.start_delivery();
        step(&mut engine, &clock, MID_WINDOW_MS);
        engine.attempt_hit();
        step(&mut engine, &clock, DISPLAY_DELAY_MS);

        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::DeliveryStarted,
                GameEvent::WindowOpened,
                GameEvent::WindowClosed,
                GameEvent::Hit { runs: 4, coins: 8 },
                GameEvent::ReturnedToIdle,
            ]
        );
    }

    #[test]
    fn test_seeded_engine_draws_from_run_table() {
        let clock = ManualClock::new();
        let mut engine = CricketEngine::new(clock.clone(), 99);
        for _ in 0..20 {
            engine.start_delivery();
            clock.advance(MID_WINDOW_MS);
            engine.attempt_hit();
            let Some(DeliveryOutcome::Runs(runs)) = engine.state().last_outcome else {
                panic!("expected a hit");
            };
            assert!(RUN_TABLE.contains(&runs));
            clock.advance(DISPLAY_DELAY_MS);
            engine.tick();
        }
        assert_eq!(engine.state().session_coins, engine.state().score * COINS_PER_RUN);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Bowl,
        Swing,
        Advance(f64),
        Reset,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            3 => Just(Action::Bowl),
            3 => Just(Action::Swing),
            4 => (0.0f64..1500.0).prop_map(Action::Advance),
            1 => Just(Action::Reset),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_for_any_input(
            actions in prop::collection::vec(action(), 1..80),
            runs in prop::collection::vec(prop::sample::select(RUN_TABLE.to_vec()), 0..40),
        ) {
            let (mut engine, clock, earned) = engine_with(&runs);
            let mut prev_wickets = engine.state().wickets_remaining;

            for action in actions {
                let was_reset = matches!(action, Action::Reset);
                match action {
                    Action::Bowl => engine.start_delivery(),
                    Action::Swing => engine.attempt_hit(),
                    Action::Advance(ms) => step(&mut engine, &clock, ms),
                    Action::Reset => {
                        engine.reset();
                        earned.borrow_mut().clear();
                    }
                }
                let state = engine.state();

                if state.hit_window_open {
                    prop_assert_eq!(state.status, GameStatus::Bowling);
                }
                prop_assert_eq!(state.status == GameStatus::Bowling, engine.delivery_in_flight());
                prop_assert!((0.0..=1.0).contains(&state.ball_progress));
                prop_assert_eq!(state.wickets_remaining == 0, state.status == GameStatus::GameOver);
                if !was_reset {
                    prop_assert!(state.wickets_remaining <= prev_wickets);
                }
                prop_assert_eq!(state.session_coins, state.score * COINS_PER_RUN);
                prop_assert_eq!(earned.borrow().iter().sum::<u32>(), state.session_coins);
                prev_wickets = state.wickets_remaining;
            }
        }

        #[test]
        fn prop_session_coins_are_twice_total_runs(
            runs in prop::collection::vec(prop::sample::select(RUN_TABLE.to_vec()), 1..30),
        ) {
            let (mut engine, clock, earned) = engine_with(&runs);
            for _ in &runs {
                engine.start_delivery();
                step(&mut engine, &clock, MID_WINDOW_MS);
                engine.attempt_hit();
                step(&mut engine, &clock, DISPLAY_DELAY_MS);
            }
            let total: u32 = runs.iter().sum();
            prop_assert_eq!(engine.state().score, total);
            prop_assert_eq!(engine.state().session_coins, 2 * total);
            prop_assert_eq!(earned.borrow().len(), runs.len());
        }

        #[test]
        fn prop_swing_outside_window_changes_nothing(
            offset in prop_oneof![0.0f64..760.0, 1440.0f64..2190.0],
        ) {
            let (mut engine, clock, earned) = engine_with(&[6]);
            engine.start_delivery();
            step(&mut engine, &clock, offset);
            let before = engine.state().clone();
            engine.attempt_hit();
            engine.attempt_hit();
            prop_assert_eq!(engine.state(), &before);
            prop_assert!(earned.borrow().is_empty());
        }
    }
}
