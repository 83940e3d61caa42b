//! Deterministic mini-game simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from an injected `Clock` only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod engine;
pub mod runs;
pub mod state;

pub use clock::{Clock, ManualClock};
pub use engine::CricketEngine;
pub use runs::{
    COINS_PER_RUN, RUN_TABLE, RunSource, ScriptedRuns, TableDraw, coins_for_runs, run_label,
};
pub use state::{DeliveryOutcome, Feedback, FeedbackTone, GameEvent, GameState, GameStatus};

/// Common surface of the portal's reward mini-games
///
/// The timed hit-window engine and the six-ball over are two instances of the
/// same pattern with independent rules and odds.
pub trait MiniGame {
    /// Advance timers against the game's clock
    fn tick(&mut self);
    /// Return every field to its initial value ("Play Again")
    fn restart(&mut self);
    /// True once the session has ended
    fn is_over(&self) -> bool;
    /// Runs scored this session
    fn score(&self) -> u32;
}
