//! Six-ball fixed over
//!
//! Turn-based cousin of the timed hit-window game: every press of "Hit Ball"
//! plays one ball, which resolves after a short bowling animation. A roll of
//! zero is out (no runs) but the over continues until all six balls are used.

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_ANIMATION_MS, BALLS_PER_OVER};
use crate::sim::clock::Monotonic;
use crate::sim::runs::OVER_RUN_TABLE;
use crate::sim::{Clock, MiniGame, RunSource, TableDraw};

/// One ball of the over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallResult {
    pub runs: u32,
    pub is_out: bool,
}

impl BallResult {
    pub fn from_roll(roll: u32) -> Self {
        Self {
            runs: roll,
            is_out: roll == 0,
        }
    }

    /// Runs credited to the score
    pub fn scored(&self) -> u32 {
        if self.is_out { 0 } else { self.runs }
    }

    /// Scorecard dot: "W" for a wicket, otherwise the run value
    pub fn dot(&self) -> String {
        if self.is_out {
            "W".to_string()
        } else {
            self.runs.to_string()
        }
    }

    /// Message shown once the ball resolves
    pub fn message(&self) -> String {
        if self.is_out {
            return "OUT! 😢".to_string();
        }
        let plural = if self.runs != 1 { "s" } else { "" };
        let flourish = match self.runs {
            6 => "🔥",
            4 => "🏏",
            _ => "✨",
        };
        format!("You scored {} run{}! {}", self.runs, plural, flourish)
    }
}

/// End-of-over verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Champion,
    GreatInnings,
    DecentPlay,
    BetterLuck,
}

impl Rating {
    pub fn for_score(score: u32) -> Self {
        match score {
            s if s >= 30 => Rating::Champion,
            s if s >= 20 => Rating::GreatInnings,
            s if s >= 10 => Rating::DecentPlay,
            _ => Rating::BetterLuck,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Champion => "Champion! 🏆",
            Rating::GreatInnings => "Great Innings! 🌟",
            Rating::DecentPlay => "Decent Play 👍",
            Rating::BetterLuck => "Better Luck Next Time 💪",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingBall {
    tag: u64,
    due_ms: f64,
    result: BallResult,
}

/// Six-ball over session
pub struct OverGame<C: Clock, R: RunSource = TableDraw> {
    score: u32,
    balls_left: usize,
    history: [Option<BallResult>; BALLS_PER_OVER],
    last_result: Option<String>,
    game_over: bool,
    pending: Option<PendingBall>,
    seq: u64,
    clock: C,
    monotonic: Monotonic,
    runs: R,
}

impl<C: Clock> OverGame<C, TableDraw> {
    /// Over with a seeded uniform 0..=6 roll
    pub fn new(clock: C, seed: u64) -> Self {
        Self::with_runs(clock, TableDraw::with_table(seed, &OVER_RUN_TABLE))
    }
}

impl<C: Clock, R: RunSource> OverGame<C, R> {
    pub fn with_runs(clock: C, runs: R) -> Self {
        Self {
            score: 0,
            balls_left: BALLS_PER_OVER,
            history: [None; BALLS_PER_OVER],
            last_result: None,
            game_over: false,
            pending: None,
            seq: 0,
            clock,
            monotonic: Monotonic::default(),
            runs,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn balls_left(&self) -> usize {
        self.balls_left
    }

    pub fn history(&self) -> &[Option<BallResult>; BALLS_PER_OVER] {
        &self.history
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True while a ball is being bowled
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn rating(&self) -> Rating {
        Rating::for_score(self.score)
    }

    fn now(&mut self) -> f64 {
        self.monotonic.observe(self.clock.now_ms())
    }

    /// Play the next ball. Ignored while animating or once the over is done.
    pub fn hit_ball(&mut self) {
        if self.balls_left == 0 || self.game_over || self.pending.is_some() {
            return;
        }
        let now = self.now();
        let result = BallResult::from_roll(self.runs.next_run());
        self.pending = Some(PendingBall {
            tag: self.seq,
            due_ms: now + BALL_ANIMATION_MS,
            result,
        });
    }

    /// Resolve a ball whose animation has finished
    pub fn tick(&mut self) {
        let now = self.now();
        let Some(pending) = self.pending else {
            return;
        };
        if pending.tag != self.seq {
            self.pending = None;
            return;
        }
        if now < pending.due_ms {
            return;
        }
        self.pending = None;

        let index = BALLS_PER_OVER - self.balls_left;
        self.history[index] = Some(pending.result);
        self.balls_left -= 1;
        self.score += pending.result.scored();
        self.last_result = Some(pending.result.message());

        if self.balls_left == 0 {
            self.game_over = true;
            log::info!("Over complete: {} runs ({})", self.score, self.rating().label());
        }
    }

    /// Start a fresh over, dropping any ball still in the air
    pub fn play_again(&mut self) {
        self.seq += 1;
        self.pending = None;
        self.score = 0;
        self.balls_left = BALLS_PER_OVER;
        self.history = [None; BALLS_PER_OVER];
        self.last_result = None;
        self.game_over = false;
    }
}

impl<C: Clock, R: RunSource> MiniGame for OverGame<C, R> {
    fn tick(&mut self) {
        OverGame::tick(self);
    }

    fn restart(&mut self) {
        self.play_again();
    }

    fn is_over(&self) -> bool {
        self.game_over
    }

    fn score(&self) -> u32 {
        self.score
    }
}
