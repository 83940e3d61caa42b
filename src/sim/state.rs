//! Game state and core simulation types
//!
//! Everything a HUD needs to draw the timed hit-window game lives here. Timer
//! bookkeeping stays private to the engine.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_WICKETS;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameStatus {
    /// Waiting for the player to bowl
    #[default]
    Idle,
    /// Ball in flight
    Bowling,
    /// Showing a connected hit
    Hit,
    /// Showing a lost wicket
    Miss,
    /// All wickets lost
    GameOver,
}

impl GameStatus {
    /// Phases from which a new delivery may start
    pub fn can_bowl(self) -> bool {
        matches!(self, GameStatus::Idle | GameStatus::Hit | GameStatus::Miss)
    }
}

/// Resolution of a single delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    Runs(u32),
    Out,
}

impl DeliveryOutcome {
    pub fn runs(self) -> u32 {
        match self {
            DeliveryOutcome::Runs(r) => r,
            DeliveryOutcome::Out => 0,
        }
    }
}

/// Popup color class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackTone {
    Runs,
    Boundary,
    Six,
    Miss,
}

impl FeedbackTone {
    pub fn for_runs(runs: u32) -> Self {
        if runs >= 6 {
            FeedbackTone::Six
        } else if runs >= 4 {
            FeedbackTone::Boundary
        } else {
            FeedbackTone::Runs
        }
    }
}

/// Transient popup shown after each delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub text: String,
    pub tone: FeedbackTone,
    /// Increments per popup so the UI can restart its animation
    pub key: u64,
}

/// Notifications for audio and HUD layers, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    DeliveryStarted,
    WindowOpened,
    WindowClosed,
    Hit { runs: u32, coins: u32 },
    Miss { wickets_remaining: u8 },
    GameOver,
    ReturnedToIdle,
    Reset,
}

/// Complete state of one timed hit-window session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    /// Ball position along the pitch, 0..=1
    pub ball_progress: f32,
    pub wickets_remaining: u8,
    /// Runs this session
    pub score: u32,
    /// Coins this session
    pub session_coins: u32,
    pub hit_window_open: bool,
    /// Kept for display until the next bowl
    pub last_outcome: Option<DeliveryOutcome>,
    pub feedback: Option<Feedback>,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_wickets(MAX_WICKETS)
    }

    pub fn with_wickets(wickets: u8) -> Self {
        Self {
            status: GameStatus::Idle,
            ball_progress: 0.0,
            wickets_remaining: wickets,
            score: 0,
            session_coins: 0,
            hit_window_open: false,
            last_outcome: None,
            feedback: None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Ball position as a percentage for the pitch overlay
    pub fn ball_percent(&self) -> f32 {
        self.ball_progress * 100.0
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
