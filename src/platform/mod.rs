//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (`performance.now()` on web)
//! - Input mapping
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod time;

pub use input::{Action, action_for_key};
