//! Leaderboard and score submission
//!
//! Mirrors the backend's top-scores list locally: sorted descending, cached
//! in LocalStorage, with the submission form validated before it is sent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::storage;

/// Entries shown on the leaderboard page
pub const LEADERBOARD_SIZE: usize = 10;
/// Longest accepted player name
pub const MAX_USERNAME_LEN: usize = 30;
/// Highest accepted submitted score
pub const MAX_SCORE: u64 = 9_999_999;

/// Sport a game or score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SportCategory {
    Cricket,
    Football,
    Basketball,
    Tennis,
}

impl SportCategory {
    pub const ALL: [SportCategory; 4] = [
        SportCategory::Cricket,
        SportCategory::Football,
        SportCategory::Basketball,
        SportCategory::Tennis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SportCategory::Cricket => "Cricket",
            SportCategory::Football => "Football",
            SportCategory::Basketball => "Basketball",
            SportCategory::Tennis => "Tennis",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SportCategory::Cricket => "🏏",
            SportCategory::Football => "⚽",
            SportCategory::Basketball => "🏀",
            SportCategory::Tennis => "🎾",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cricket" => Some(SportCategory::Cricket),
            "football" | "soccer" => Some(SportCategory::Football),
            "basketball" => Some(SportCategory::Basketball),
            "tennis" => Some(SportCategory::Tennis),
            _ => None,
        }
    }
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub username: String,
    pub score: u64,
    pub category: SportCategory,
}

/// Score form failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("player name is required")]
    MissingUsername,
    #[error("player name too long (len={len}, max={max})")]
    UsernameTooLong { len: usize, max: usize },
    #[error("score is required")]
    MissingScore,
    #[error("score must be a whole number between 0 and {max}")]
    InvalidScore { max: u64 },
    #[error("select a sport")]
    MissingCategory,
}

/// Validate the raw form fields into a score row
pub fn validate_submission(
    username: &str,
    score: &str,
    category: Option<SportCategory>,
) -> Result<PlayerScore, SubmissionError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(SubmissionError::MissingUsername);
    }
    let len = username.chars().count();
    if len > MAX_USERNAME_LEN {
        return Err(SubmissionError::UsernameTooLong {
            len,
            max: MAX_USERNAME_LEN,
        });
    }

    let score = score.trim();
    if score.is_empty() {
        return Err(SubmissionError::MissingScore);
    }
    let score: u64 = score
        .parse()
        .ok()
        .filter(|s| *s <= MAX_SCORE)
        .ok_or(SubmissionError::InvalidScore { max: MAX_SCORE })?;

    let category = category.ok_or(SubmissionError::MissingCategory)?;

    Ok(PlayerScore {
        username: username.to_string(),
        score,
        category,
    })
}

/// Medal shown next to the top three ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBadge {
    Gold,
    Silver,
    Bronze,
    Plain(usize),
}

impl RankBadge {
    /// Badge for a 1-indexed rank
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => RankBadge::Gold,
            2 => RankBadge::Silver,
            3 => RankBadge::Bronze,
            n => RankBadge::Plain(n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            RankBadge::Gold => "🥇".to_string(),
            RankBadge::Silver => "🥈".to_string(),
            RankBadge::Bronze => "🥉".to_string(),
            RankBadge::Plain(n) => format!("#{}", n),
        }
    }
}

/// Score table, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<PlayerScore>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    const STORAGE_KEY: &'static str = "r2s_play_leaderboard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from an unsorted backend response
    pub fn from_scores(scores: impl IntoIterator<Item = PlayerScore>) -> Self {
        let mut board = Self::new();
        for score in scores {
            board.insert(score);
        }
        board
    }

    /// Rank a score would achieve (1-indexed). Ties rank below existing entries.
    pub fn potential_rank(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len())
            + 1
    }

    /// Insert a score and return the rank it achieved (1-indexed)
    pub fn insert(&mut self, entry: PlayerScore) -> usize {
        let rank = self.potential_rank(entry.score);
        self.entries.insert(rank - 1, entry);
        rank
    }

    /// Rows for the leaderboard page, with their ranks
    pub fn top(&self, n: usize) -> impl Iterator<Item = (usize, &PlayerScore)> {
        self.entries.iter().take(n).enumerate().map(|(i, e)| (i + 1, e))
    }

    /// Scores for one sport, still in rank order
    pub fn by_category(&self, category: SportCategory) -> Vec<&PlayerScore> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the cached table from LocalStorage
    pub fn load() -> Self {
        match storage::load_json::<Leaderboard>(Self::STORAGE_KEY) {
            Some(mut board) => {
                // The cache may come from an older build that did not keep order
                board.entries.sort_by(|a, b| b.score.cmp(&a.score));
                log::info!("Loaded {} cached scores", board.entries.len());
                board
            }
            None => {
                log::info!("No cached scores, starting fresh");
                Self::new()
            }
        }
    }

    /// Cache the table in LocalStorage
    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Leaderboard cached ({} entries)", self.entries.len());
        } else {
            log::warn!("Leaderboard not cached");
        }
    }

    /// Text rows for the leaderboard panel
    pub fn rows(&self, n: usize) -> Vec<String> {
        self.top(n)
            .map(|(rank, e)| {
                format!(
                    "{} {} {} {}",
                    RankBadge::for_rank(rank).label(),
                    e.username,
                    e.category.emoji(),
                    e.score
                )
            })
            .collect()
    }
}
