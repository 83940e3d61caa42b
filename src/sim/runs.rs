//! Run outcome tables and reward math
//!
//! The distributions are literal slot tables: every slot is equally likely,
//! so a value's probability is its slot count over the table length.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::collections::VecDeque;

pub use crate::consts::COINS_PER_RUN;

/// Timed hit-window outcome table.
///
/// P(1) = P(2) = P(4) = P(6) = 2/9, P(3) = 1/9. Never yields 0: a connected
/// hit always scores.
pub const RUN_TABLE: [u32; 9] = [1, 1, 2, 2, 3, 4, 4, 6, 6];

/// Six-ball over outcome table: 0..=6 uniform, 0 is out.
pub const OVER_RUN_TABLE: [u32; 7] = [0, 1, 2, 3, 4, 5, 6];

/// Coins earned for a run value at the default rate
#[inline]
pub fn coins_for_runs(runs: u32) -> u32 {
    runs.saturating_mul(COINS_PER_RUN)
}

/// Popup label for a resolved hit
pub fn run_label(runs: u32) -> String {
    match runs {
        0 => "OUT! 💀".to_string(),
        1 => "1 Run!".to_string(),
        4 => "4! 🔥".to_string(),
        6 => "6! 🚀".to_string(),
        n => format!("{} Runs!", n),
    }
}

/// Source of run values for resolved hits
pub trait RunSource {
    fn next_run(&mut self) -> u32;
}

/// Seeded uniform draw over a slot table
#[derive(Debug, Clone)]
pub struct TableDraw {
    table: &'static [u32],
    rng: Pcg32,
}

impl TableDraw {
    /// Draw from `RUN_TABLE`
    pub fn new(seed: u64) -> Self {
        Self::with_table(seed, &RUN_TABLE)
    }

    /// Draw from an arbitrary non-empty table
    pub fn with_table(seed: u64, table: &'static [u32]) -> Self {
        debug_assert!(!table.is_empty(), "run table must not be empty");
        Self {
            table,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn table(&self) -> &'static [u32] {
        self.table
    }
}

impl RunSource for TableDraw {
    fn next_run(&mut self) -> u32 {
        if self.table.is_empty() {
            return 0;
        }
        let slot = self.rng.random_range(0..self.table.len());
        self.table[slot]
    }
}

/// Fixed sequence of runs; once exhausted yields `fallback`
#[derive(Debug, Clone, Default)]
pub struct ScriptedRuns {
    queue: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRuns {
    pub fn new(runs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: runs.into_iter().collect(),
            fallback: RUN_TABLE[0],
        }
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn push(&mut self, runs: u32) {
        self.queue.push_back(runs);
    }
}

impl RunSource for ScriptedRuns {
    fn next_run(&mut self) -> u32 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}
