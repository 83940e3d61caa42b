//! Page coin balance and withdraw requests
//!
//! The wallet collects coins from the mini-games and from tap-to-earn. The
//! persisted account balance and payout rules belong to the backend; this
//! module only validates a withdraw request before it is handed over.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MIN_WITHDRAW_COINS, TAP_REWARD};
use crate::platform::storage;

/// Withdraw validation failures, phrased for display
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WithdrawError {
    #[error("Minimum {required} coins required!")]
    InsufficientCoins { balance: u32, required: u32 },
    #[error("Please enter your UPI ID.")]
    MissingUpiId,
    #[error("User profile not loaded. Please log in.")]
    ProfileNotLoaded,
    #[error("unknown withdraw amount '{0}'")]
    UnknownAmount(String),
    #[error("Failed to submit withdraw request. Please try again.")]
    SubmitFailed,
}

/// Payout tiers offered in the withdraw dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WithdrawAmount {
    #[default]
    Rs100,
    Rs250,
    Rs500,
}

impl WithdrawAmount {
    pub const ALL: [WithdrawAmount; 3] = [
        WithdrawAmount::Rs100,
        WithdrawAmount::Rs250,
        WithdrawAmount::Rs500,
    ];

    pub fn rupees(&self) -> u32 {
        match self {
            WithdrawAmount::Rs100 => 100,
            WithdrawAmount::Rs250 => 250,
            WithdrawAmount::Rs500 => 500,
        }
    }

    /// Display label, also the value sent to the backend
    pub fn label(&self) -> &'static str {
        match self {
            WithdrawAmount::Rs100 => "₹100",
            WithdrawAmount::Rs250 => "₹250",
            WithdrawAmount::Rs500 => "₹500",
        }
    }

    /// Parse a label, with or without the rupee sign
    pub fn parse(s: &str) -> Result<Self, WithdrawError> {
        let digits = s.trim().trim_start_matches('₹').trim();
        Self::ALL
            .into_iter()
            .find(|a| a.rupees().to_string() == digits)
            .ok_or_else(|| WithdrawError::UnknownAmount(s.to_string()))
    }
}

/// Caller profile, as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

/// Validated request, ready for the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub user_id: String,
    /// Amount label, e.g. "₹100"
    pub amount: String,
    pub upi_id: String,
}

impl WithdrawRequest {
    /// LocalStorage key the host page's backend client polls
    pub const PENDING_KEY: &'static str = "r2s_play_pending_withdraw";

    /// Queue the request for the host page
    pub fn queue(&self) -> Result<(), WithdrawError> {
        self.hand_off(|request| storage::save_json(Self::PENDING_KEY, request))
    }

    /// Pass the request to `store`, which reports whether it was accepted
    pub fn hand_off(
        &self,
        store: impl FnOnce(&WithdrawRequest) -> bool,
    ) -> Result<(), WithdrawError> {
        if !store(self) {
            log::warn!("Withdraw request for {} was not handed off", self.user_id);
            return Err(WithdrawError::SubmitFailed);
        }
        log::info!("Withdraw request queued: {} to {}", self.amount, self.upi_id);
        Ok(())
    }
}

/// Contents of the withdraw dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithdrawForm {
    pub amount: WithdrawAmount,
    pub upi_id: String,
}

impl WithdrawForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the form and build the request
    pub fn submit(&self, profile: Option<&UserProfile>) -> Result<WithdrawRequest, WithdrawError> {
        let upi_id = self.upi_id.trim();
        if upi_id.is_empty() {
            return Err(WithdrawError::MissingUpiId);
        }
        let profile = profile.ok_or(WithdrawError::ProfileNotLoaded)?;

        Ok(WithdrawRequest {
            user_id: profile.user_id.clone(),
            amount: self.amount.label().to_string(),
            upi_id: upi_id.to_string(),
        })
    }
}

/// Coins collected on this page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    coins: u32,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    /// Credit coins earned in a mini-game
    pub fn credit(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Tap-to-earn. Returns the amount credited.
    pub fn tap(&mut self) -> u32 {
        self.credit(TAP_REWARD);
        TAP_REWARD
    }

    pub fn can_withdraw(&self) -> bool {
        self.coins >= MIN_WITHDRAW_COINS
    }

    /// Coins still needed before a withdraw can be opened
    pub fn coins_to_withdraw(&self) -> u32 {
        MIN_WITHDRAW_COINS.saturating_sub(self.coins)
    }

    /// Open the withdraw dialog with a blank form
    pub fn begin_withdraw(&self) -> Result<WithdrawForm, WithdrawError> {
        if !self.can_withdraw() {
            return Err(WithdrawError::InsufficientCoins {
                balance: self.coins,
                required: MIN_WITHDRAW_COINS,
            });
        }
        Ok(WithdrawForm::new())
    }
}
