//! Engine tuning and player preferences
//!
//! Persisted in LocalStorage on the web; on native the demo binary may read
//! the same JSON document from a file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::platform::storage;

/// Timing and reward constants for the timed hit-window engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Time for the ball to cross the pitch (ms)
    pub delivery_ms: f64,
    /// Hit band start, as a fraction of the delivery (inclusive)
    pub hit_window_start: f32,
    /// Hit band end, as a fraction of the delivery (exclusive)
    pub hit_window_end: f32,
    /// Hit/Miss display time before returning to Idle (ms)
    pub display_delay_ms: f64,
    /// Feedback popup lifetime (ms)
    pub feedback_ms: f64,
    pub max_wickets: u8,
    pub coins_per_run: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delivery_ms: DELIVERY_MS,
            hit_window_start: HIT_WINDOW_START,
            hit_window_end: HIT_WINDOW_END,
            display_delay_ms: DISPLAY_DELAY_MS,
            feedback_ms: FEEDBACK_MS,
            max_wickets: MAX_WICKETS,
            coins_per_run: COINS_PER_RUN,
        }
    }
}

impl EngineConfig {
    /// True if ball progress `p` lies inside the hit band
    #[inline]
    pub fn in_hit_window(&self, p: f32) -> bool {
        p >= self.hit_window_start && p < self.hit_window_end
    }

    /// Hit band length in milliseconds
    pub fn hit_window_ms(&self) -> f64 {
        (self.hit_window_end - self.hit_window_start) as f64 * self.delivery_ms
    }

    /// Replace unusable values with defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.delivery_ms.is_finite() && self.delivery_ms > 0.0) {
            log::warn!("Invalid delivery_ms {}, using default", self.delivery_ms);
            self.delivery_ms = defaults.delivery_ms;
        }

        let start_ok = (0.0..=1.0).contains(&self.hit_window_start);
        let end_ok = (0.0..=1.0).contains(&self.hit_window_end);
        if !(start_ok && end_ok && self.hit_window_start < self.hit_window_end) {
            log::warn!(
                "Invalid hit window [{}, {}), using default",
                self.hit_window_start,
                self.hit_window_end
            );
            self.hit_window_start = defaults.hit_window_start;
            self.hit_window_end = defaults.hit_window_end;
        }

        if !(self.display_delay_ms.is_finite() && self.display_delay_ms >= 0.0) {
            self.display_delay_ms = defaults.display_delay_ms;
        }
        if !(self.feedback_ms.is_finite() && self.feedback_ms >= 0.0) {
            self.feedback_ms = defaults.feedback_ms;
        }
        if self.max_wickets == 0 {
            log::warn!("max_wickets must be at least 1, using default");
            self.max_wickets = defaults.max_wickets;
        }
        self
    }
}

/// Errors reading a settings document
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    /// Procedural sound effects
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Skip popup animations
    pub reduced_motion: bool,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            sound: true,
            volume: 0.8,
            reduced_motion: false,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "r2s_play_settings_v1";

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Read a JSON document from disk (native demo)
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn sanitized(mut self) -> Self {
        self.engine = self.engine.validated();
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound { self.volume } else { 0.0 }
    }

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from storage");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        } else {
            log::warn!("Settings not saved");
        }
    }

    /// Flip sound on/off. Returns the new state.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hit_window() {
        let config = EngineConfig::default();
        assert!(!config.in_hit_window(0.34));
        assert!(config.in_hit_window(0.35));
        assert!(config.in_hit_window(0.5));
        assert!(!config.in_hit_window(0.65));
        assert!((config.hit_window_ms() - 660.0).abs() < 0.1);
    }

    #[test]
    fn test_validated_replaces_bad_values() {
        let config = EngineConfig {
            delivery_ms: 0.0,
            hit_window_start: 0.8,
            hit_window_end: 0.2,
            display_delay_ms: f64::NAN,
            feedback_ms: -1.0,
            max_wickets: 0,
            coins_per_run: 5,
        }
        .validated();

        let defaults = EngineConfig::default();
        assert_eq!(config.delivery_ms, defaults.delivery_ms);
        assert_eq!(config.hit_window_start, defaults.hit_window_start);
        assert_eq!(config.hit_window_end, defaults.hit_window_end);
        assert_eq!(config.display_delay_ms, defaults.display_delay_ms);
        assert_eq!(config.feedback_ms, defaults.feedback_ms);
        assert_eq!(config.max_wickets, defaults.max_wickets);
        assert_eq!(config.coins_per_run, 5);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "sound": false, "engine": { "delivery_ms": 3000 } }"#)
                .unwrap();
        assert!(!settings.sound);
        assert_eq!(settings.engine.delivery_ms, 3000.0);
        assert_eq!(settings.engine.max_wickets, MAX_WICKETS);
        assert_eq!(settings.effective_volume(), 0.0);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Settings::from_file("/nonexistent/r2s-settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_native_load_uses_defaults() {
        assert_eq!(Settings::load(), Settings::default());
    }

    #[test]
    fn test_toggle_sound_and_native_save() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_sound());
        assert_eq!(settings.effective_volume(), 0.0);
        settings.save();
        // Native save is a no-op, so defaults come back
        assert!(Settings::load().sound);
        assert!(settings.toggle_sound());
        assert_eq!(settings.effective_volume(), settings.volume);
    }
}
