//! R2S Play & Earn - cricket mini-games with a coin wallet
//!
//! Core modules:
//! - `sim`: Deterministic mini-game engines (timed hit window, run tables, clock)
//! - `over`: Six-ball fixed over game
//! - `wallet`: Session coin balance and withdraw request validation
//! - `leaderboard`: Player scores and score submission validation
//! - `settings`: Engine tuning and preferences
//! - `platform`: Browser/native platform abstraction
//! - `audio`: Procedural sound effects

pub mod audio;
pub mod leaderboard;
pub mod over;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod wallet;

pub use leaderboard::{Leaderboard, PlayerScore, SportCategory};
pub use settings::{EngineConfig, Settings};
pub use wallet::Wallet;

/// Game configuration constants
pub mod consts {
    /// Time for the ball to cross the pitch (ms)
    pub const DELIVERY_MS: f64 = 2200.0;
    /// Ball progress at which the hit window opens (inclusive)
    pub const HIT_WINDOW_START: f32 = 0.35;
    /// Ball progress at which the hit window closes (exclusive)
    pub const HIT_WINDOW_END: f32 = 0.65;
    /// How long a Hit/Miss result stays on screen before returning to Idle (ms)
    pub const DISPLAY_DELAY_MS: f64 = 900.0;
    /// How long a feedback popup stays visible (ms)
    pub const FEEDBACK_MS: f64 = 1200.0;

    /// Wickets per session
    pub const MAX_WICKETS: u8 = 3;
    /// Reward currency per run scored
    pub const COINS_PER_RUN: u32 = 2;

    /// Coins credited per tap on "Tap to Earn"
    pub const TAP_REWARD: u32 = 5;
    /// Minimum balance before a withdraw request may be opened
    pub const MIN_WITHDRAW_COINS: u32 = 1000;

    /// Balls in the fixed over game
    pub const BALLS_PER_OVER: usize = 6;
    /// Bowling animation before an over ball resolves (ms)
    pub const BALL_ANIMATION_MS: f64 = 300.0;
}
