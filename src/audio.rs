//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no external files needed. The
//! event-to-sound mapping is plain Rust; only `AudioManager` touches the
//! browser.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball released
    Bowl,
    /// Ball enters the hit zone
    WindowOpen,
    /// Bat on ball, 1-3 runs
    BatHit,
    /// Four
    Boundary,
    /// Six
    Six,
    /// Wicket lost
    Wicket,
    /// Last wicket lost
    GameOver,
    /// Coins credited by tap-to-earn
    Coin,
}

impl SoundEffect {
    /// Sound for an engine event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::DeliveryStarted => Some(SoundEffect::Bowl),
            GameEvent::WindowOpened => Some(SoundEffect::WindowOpen),
            GameEvent::Hit { runs, .. } if runs >= 6 => Some(SoundEffect::Six),
            GameEvent::Hit { runs, .. } if runs >= 4 => Some(SoundEffect::Boundary),
            GameEvent::Hit { .. } => Some(SoundEffect::BatHit),
            GameEvent::Miss { wickets_remaining } if wickets_remaining > 0 => {
                Some(SoundEffect::Wicket)
            }
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::Miss { .. }
            | GameEvent::WindowClosed
            | GameEvent::ReturnedToIdle
            | GameEvent::Reset => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::SoundEffect;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.8,
                muted: false,
            }
        }

        /// Set volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.volume }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Bowl => self.play_bowl(ctx, vol),
                SoundEffect::WindowOpen => self.play_window_open(ctx, vol),
                SoundEffect::BatHit => self.play_bat_hit(ctx, vol),
                SoundEffect::Boundary => self.play_fanfare(ctx, vol, &[400.0, 500.0, 600.0], 0.1),
                SoundEffect::Six => {
                    self.play_fanfare(ctx, vol, &[500.0, 600.0, 700.0, 800.0, 1000.0], 0.08)
                }
                SoundEffect::Wicket => self.play_wicket(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::Coin => self.play_coin(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Bowl - whoosh up
        fn play_bowl(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Hit zone - short tick
        fn play_window_open(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.05)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.06).ok();
        }

        /// Bat on ball - solid thump
        fn play_bat_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(60.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Rising arpeggio after the bat thump
        fn play_fanfare(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], step: f64) {
            self.play_bat_hit(ctx, vol);
            for (i, freq) in freqs.iter().enumerate() {
                let delay = i as f64 * step;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }

        /// Wicket - stumps rattle
        fn play_wicket(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency().set_value_at_time(300.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.1).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }

        /// Coin - bright ping
        fn play_coin(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 988.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(988.0, t).ok();
            osc.frequency().set_value_at_time(1319.0, t + 0.05).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }
}
