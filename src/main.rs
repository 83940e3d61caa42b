//! R2S Play & Earn entry point
//!
//! On the web, wires the engines into the page and drives them from
//! `requestAnimationFrame`. On native, plays a scripted headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, HtmlSelectElement, KeyboardEvent, MouseEvent};

    use r2s_play::audio::{AudioManager, SoundEffect};
    use r2s_play::leaderboard::{LEADERBOARD_SIZE, validate_submission};
    use r2s_play::over::OverGame;
    use r2s_play::platform::storage;
    use r2s_play::platform::time::PerformanceClock;
    use r2s_play::platform::{Action, action_for_key};
    use r2s_play::sim::{CricketEngine, GameStatus, TableDraw};
    use r2s_play::wallet::{UserProfile, WithdrawAmount, WithdrawForm};
    use r2s_play::{Leaderboard, Settings, SportCategory, Wallet};

    /// Caller profile, written by the host page after login
    const PROFILE_KEY: &str = "r2s_play_profile";

    /// Page instance holding all state
    struct Game {
        engine: CricketEngine<PerformanceClock, TableDraw>,
        over: OverGame<PerformanceClock, TableDraw>,
        wallet: Rc<RefCell<Wallet>>,
        withdraw_form: Option<WithdrawForm>,
        leaderboard: Leaderboard,
        audio: AudioManager,
        settings: Settings,
        last_feedback_key: u64,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let wallet = Rc::new(RefCell::new(Wallet::new()));
            let mut engine = CricketEngine::with_parts(
                PerformanceClock::new(),
                TableDraw::new(seed),
                settings.engine.clone(),
            );
            let sink = wallet.clone();
            engine.on_coins_earned(move |n| sink.borrow_mut().credit(n));

            let mut audio = AudioManager::new();
            audio.set_volume(settings.volume);
            audio.set_muted(!settings.sound);

            Self {
                engine,
                over: OverGame::new(PerformanceClock::new(), seed.wrapping_add(1)),
                wallet,
                withdraw_form: None,
                leaderboard: Leaderboard::load(),
                audio,
                settings,
                last_feedback_key: 0,
            }
        }

        fn apply(&mut self, action: Action) {
            match action {
                Action::Bowl => self.engine.start_delivery(),
                Action::Hit => self.engine.attempt_hit(),
                Action::PlayAgain => self.engine.reset(),
                Action::Tap => {
                    let earned = self.wallet.borrow_mut().tap();
                    self.audio.play(SoundEffect::Coin);
                    set_text("tap-message", &format!("+{} coins!", earned));
                }
                Action::Withdraw => self.open_withdraw(),
            }
        }

        fn open_withdraw(&mut self) {
            let result = self.wallet.borrow().begin_withdraw();
            match result {
                Ok(form) => {
                    self.withdraw_form = Some(form);
                    set_text("withdraw-error", "");
                    set_hidden("withdraw-dialog", false);
                }
                Err(e) => {
                    self.withdraw_form = None;
                    set_text("withdraw-error", &e.to_string());
                    set_hidden("withdraw-dialog", true);
                }
            }
        }

        fn submit_withdraw(&mut self) {
            let Some(form) = self.withdraw_form.as_mut() else {
                return;
            };
            if let Some(value) = field_value("withdraw-amount") {
                match WithdrawAmount::parse(&value) {
                    Ok(amount) => form.amount = amount,
                    Err(e) => log::warn!("{}", e),
                }
            }
            form.upi_id = field_value("upi-id").unwrap_or_default();

            let profile = storage::load_json::<UserProfile>(PROFILE_KEY);
            let queued = form.submit(profile.as_ref()).and_then(|request| request.queue());
            match queued {
                Ok(()) => {
                    set_text("withdraw-error", "");
                    set_text("withdraw-status", "Request submitted. Admin will process it shortly.");
                    self.withdraw_form = None;
                    set_hidden("withdraw-dialog", true);
                }
                // The form stays open so the player can retry
                Err(e) => set_text("withdraw-error", &e.to_string()),
            }
        }

        fn submit_score(&mut self) {
            let name = field_value("score-name").unwrap_or_default();
            let score = field_value("score-value").unwrap_or_default();
            let category = field_value("score-category").and_then(|c| SportCategory::from_str(&c));

            match validate_submission(&name, &score, category) {
                Ok(entry) => {
                    let rank = self.leaderboard.insert(entry);
                    self.leaderboard.save();
                    set_text("score-error", "");
                    set_text("score-status", &format!("Score submitted! Rank #{}", rank));
                    self.render_leaderboard();
                }
                Err(e) => set_text("score-error", &e.to_string()),
            }
        }

        fn render_leaderboard(&self) {
            let rows = self.leaderboard.rows(LEADERBOARD_SIZE);
            if rows.is_empty() {
                set_text("leaderboard-list", "No scores yet");
            } else {
                set_text("leaderboard-list", &rows.join("\n"));
            }
        }

        fn toggle_sound(&mut self) {
            let on = self.settings.toggle_sound();
            self.audio.set_muted(!on);
            self.settings.save();
            set_text("sound-toggle", if on { "🔊" } else { "🔇" });
        }

        fn frame(&mut self) {
            self.engine.tick();
            self.over.tick();
            for event in self.engine.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }
            self.update_hud();
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let state = self.engine.state().clone();

            set_text("hud-score", &state.score.to_string());
            set_text("hud-wickets", &state.wickets_remaining.to_string());
            set_text("hud-session-coins", &state.session_coins.to_string());
            set_text("hud-coins", &self.wallet.borrow().coins().to_string());

            if let Some(ball) = document().get_element_by_id("ball") {
                let _ = ball.set_attribute(
                    "style",
                    &format!("left: calc({:.2}% - 14px)", state.ball_percent()),
                );
            }
            set_hidden("ball", state.status != GameStatus::Bowling);
            set_hidden("hit-zone-active", !state.hit_window_open);
            set_disabled("bowl-btn", !state.status.can_bowl());
            set_disabled("hit-btn", !state.hit_window_open);

            match &state.feedback {
                Some(f) => {
                    set_text("feedback", &f.text);
                    // Restart the pop animation for each new popup
                    if f.key != self.last_feedback_key && !self.settings.reduced_motion {
                        if let Some(el) = document().get_element_by_id("feedback") {
                            let classes = el.class_list();
                            let _ = classes.remove_1("pop");
                            let _ = classes.add_1("pop");
                        }
                    }
                    self.last_feedback_key = f.key;
                }
                None => set_text("feedback", ""),
            }
            set_hidden("game-over", state.status != GameStatus::GameOver);

            set_text("over-score", &self.over.score().to_string());
            set_text("over-balls-left", &self.over.balls_left().to_string());
            set_text("over-result", self.over.last_result().unwrap_or(""));
            let dots: Vec<String> = self
                .over
                .history()
                .iter()
                .map(|b| b.map(|b| b.dot()).unwrap_or_else(|| "•".to_string()))
                .collect();
            set_text("over-history", &dots.join(" "));
            if self.over.is_game_over() {
                set_text("over-rating", self.over.rating().label());
            }
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn set_disabled(id: &str, disabled: bool) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.toggle_attribute_with_force("disabled", disabled);
        }
    }

    /// Value of an input or select field
    fn field_value(id: &str) -> Option<String> {
        let el = document().get_element_by_id(id)?;
        match el.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(input.value()),
            Err(el) => el.dyn_into::<HtmlSelectElement>().ok().map(|s| s.value()),
        }
    }

    fn on_click(id: &str, game: Rc<RefCell<Game>>, handler: fn(&mut Game)) {
        let Some(btn) = document().get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            handler(&mut game.borrow_mut());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        log::info!("R2S Play & Earn started with seed: {}", seed);

        set_hidden("loading", true);
        {
            let g = game.borrow();
            g.render_leaderboard();
            set_text("sound-toggle", if g.settings.sound { "🔊" } else { "🔇" });
        }

        on_click("bowl-btn", game.clone(), |g| g.apply(Action::Bowl));
        on_click("hit-btn", game.clone(), |g| g.apply(Action::Hit));
        on_click("play-again-btn", game.clone(), |g| g.apply(Action::PlayAgain));
        on_click("tap-btn", game.clone(), |g| g.apply(Action::Tap));
        on_click("withdraw-btn", game.clone(), |g| g.apply(Action::Withdraw));
        on_click("withdraw-submit", game.clone(), Game::submit_withdraw);
        on_click("withdraw-cancel", game.clone(), |g| {
            g.withdraw_form = None;
            set_hidden("withdraw-dialog", true);
        });
        on_click("over-hit-btn", game.clone(), |g| g.over.hit_ball());
        on_click("over-play-again-btn", game.clone(), |g| g.over.play_again());
        on_click("score-submit", game.clone(), Game::submit_score);
        on_click("sound-toggle", game.clone(), Game::toggle_sound);

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let status = g.engine.state().status;
                if let Some(action) = action_for_key(&event.key(), status) {
                    event.prevent_default();
                    g.apply(action);
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game.borrow_mut().frame();
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use std::cell::RefCell;
    use std::rc::Rc;

    use r2s_play::consts::{BALL_ANIMATION_MS, MIN_WITHDRAW_COINS};
    use r2s_play::over::OverGame;
    use r2s_play::sim::{CricketEngine, GameEvent, GameStatus, ManualClock, MiniGame, TableDraw};
    use r2s_play::{Leaderboard, Settings, SportCategory, Wallet};

    /// Simulated frame interval (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Headless R2S Play & Earn session
    #[derive(Debug, Parser)]
    #[command(name = "r2s-play", version, about)]
    pub struct Args {
        /// RNG seed (runs and simulated player)
        #[arg(long)]
        seed: Option<u64>,
        /// Settings JSON document
        #[arg(long)]
        config: Option<PathBuf>,
        /// Chance the simulated player lets a ball through
        #[arg(long, default_value_t = 0.25)]
        miss_rate: f64,
        /// Stop after this many deliveries even if wickets remain
        #[arg(long, default_value_t = 60)]
        max_deliveries: u32,
        /// Tap-to-earn presses before playing
        #[arg(long, default_value_t = 0)]
        taps: u32,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let settings = match &args.config {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load(),
        };
        let seed = args.seed.or(settings.seed).unwrap_or(0x5EED);
        log::info!("Headless session, seed {}", seed);

        let clock = ManualClock::new();
        let wallet = Rc::new(RefCell::new(Wallet::new()));
        for _ in 0..args.taps {
            wallet.borrow_mut().tap();
        }

        let mut engine = CricketEngine::with_parts(
            clock.clone(),
            TableDraw::new(seed),
            settings.engine.clone(),
        );
        let sink = wallet.clone();
        engine.on_coins_earned(move |n| sink.borrow_mut().credit(n));

        let mut player = Pcg32::seed_from_u64(seed ^ 0xBA75);
        let miss_rate = args.miss_rate.clamp(0.0, 1.0);
        let mut deliveries = 0;

        while !engine.is_over() && deliveries < args.max_deliveries {
            engine.start_delivery();
            deliveries += 1;
            let swing = !player.random_bool(miss_rate);

            while engine.state().status == GameStatus::Bowling {
                clock.advance(FRAME_MS);
                engine.tick();
                if swing && engine.state().hit_window_open && player.random_bool(0.2) {
                    engine.attempt_hit();
                }
            }
            for event in engine.drain_events() {
                match event {
                    GameEvent::Hit { runs, coins } => {
                        log::info!("Ball {}: {} runs (+{} coins)", deliveries, runs, coins)
                    }
                    GameEvent::Miss { wickets_remaining } => {
                        log::info!("Ball {}: missed, {} wickets left", deliveries, wickets_remaining)
                    }
                    _ => {}
                }
            }

            // Let the result display play out
            while matches!(engine.state().status, GameStatus::Hit | GameStatus::Miss) {
                clock.advance(FRAME_MS);
                engine.tick();
            }
        }

        let state = engine.state();
        println!(
            "Timed game: {} deliveries, {} runs, {} coins, {} wickets left{}",
            deliveries,
            state.score,
            state.session_coins,
            state.wickets_remaining,
            if engine.is_over() { " (game over)" } else { "" }
        );

        let mut over = OverGame::new(clock.clone(), seed.wrapping_add(1));
        while !over.is_over() {
            over.hit_ball();
            clock.advance(BALL_ANIMATION_MS);
            over.tick();
        }
        let dots: Vec<String> = over
            .history()
            .iter()
            .flatten()
            .map(|b| b.dot())
            .collect();
        println!(
            "Six-ball over: [{}] {} runs, {}",
            dots.join(" "),
            over.score(),
            over.rating().label()
        );

        let wallet = wallet.borrow();
        if wallet.can_withdraw() {
            println!("Wallet: {} coins, withdraw available", wallet.coins());
        } else {
            println!(
                "Wallet: {} coins, {} more needed to withdraw (minimum {})",
                wallet.coins(),
                wallet.coins_to_withdraw(),
                MIN_WITHDRAW_COINS
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    demo::run()
}
