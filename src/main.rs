//! Cube Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use cube_runner::audio::{self, AudioManager};
    use cube_runner::highscores::Leaderboard;
    use cube_runner::render::FrameSnapshot;
    use cube_runner::settings::Settings;
    use cube_runner::sim::{Difficulty, GameEvent, GamePhase, GameSession, InputState, Theme};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        leaderboard: Leaderboard,
        settings: Settings,
        audio: AudioManager,
        input: InputState,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let leaderboard = Leaderboard::load();
            let audio = AudioManager::new(&settings);
            Self {
                session: GameSession::with_settings(seed, &settings),
                leaderboard,
                settings,
                audio,
                input: InputState::new(),
            }
        }

        /// One animation frame: consume input, tick, route events, redraw HUD.
        fn frame(&mut self, now_ms: f64) {
            let tick_input = self.input.sample();
            self.session.update(&tick_input, now_ms, &self.leaderboard);

            for event in self.session.drain_events() {
                self.handle_event(event);
            }

            self.audio.set_music_enabled(self.session.music_enabled);
            self.sync_settings();
            self.update_hud(now_ms);
        }

        fn handle_event(&mut self, event: GameEvent) {
            if let Some(effect) = audio::effect_for(&event) {
                self.audio.play(effect);
            }
            match event {
                GameEvent::AchievementUnlocked { threshold } => {
                    log::info!("Achievement unlocked at {} points", threshold);
                }
                GameEvent::GameOver { score, qualifies } => {
                    log::info!("Run ended: {} points (qualifies: {})", score, qualifies);
                }
                _ => {}
            }
        }

        /// Persist preference changes made through in-game toggles.
        fn sync_settings(&mut self) {
            let changed = self.settings.music_enabled != self.session.music_enabled
                || self.settings.difficulty != self.session.difficulty
                || self.settings.theme != self.session.theme;
            if changed {
                self.settings.music_enabled = self.session.music_enabled;
                self.settings.difficulty = self.session.difficulty;
                self.settings.theme = self.session.theme;
                self.settings.save();
            }
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self, now_ms: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = FrameSnapshot::capture(&self.session, now_ms);

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-high") {
                el.set_text_content(Some(&snapshot.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-shield") {
                let text = if snapshot.shield_active {
                    "SHIELD ACTIVE"
                } else if snapshot.shield_held {
                    "shield ready (space)"
                } else {
                    ""
                };
                el.set_text_content(Some(text));
            }

            // Achievement banner
            if let Some(el) = document.get_element_by_id("banner") {
                match snapshot.banner {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "banner");
                    }
                    None => {
                        let _ = el.set_attribute("class", "banner hidden");
                    }
                }
            }

            // Phase-driven screens
            set_visible(&document, "menu", snapshot.phase == GamePhase::Menu);
            set_visible(&document, "pause-overlay", snapshot.phase == GamePhase::Paused);
            set_visible(&document, "game-over", snapshot.phase == GamePhase::GameOver);
            set_visible(
                &document,
                "name-entry",
                snapshot.phase == GamePhase::GameOver && self.session.awaiting_name_entry(),
            );

            if snapshot.phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&snapshot.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-dodged") {
                    el.set_text_content(Some(&self.session.obstacles_dodged.to_string()));
                }
                if let Some(el) = document.get_element_by_id("leaderboard-list") {
                    let lines: Vec<String> = self
                        .leaderboard
                        .entries()
                        .iter()
                        .enumerate()
                        .map(|(i, e)| format!("{}. {} - {}", i + 1, e.name, e.score))
                        .collect();
                    el.set_text_content(Some(&lines.join("\n")));
                }
            }
        }

        /// Read the name field and record the pending leaderboard entry.
        fn submit_pending_name(&mut self) {
            let name = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("name-input"))
                .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();
            let name = if name.trim().is_empty() {
                "???".to_string()
            } else {
                name.trim().to_string()
            };

            if let Some(rank) = self.session.submit_name(&name, &mut self.leaderboard) {
                log::info!("Leaderboard entry '{}' at rank {}", name, rank);
                self.leaderboard.save();
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cube Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_menu_buttons(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Cube Runner running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "j" | "J" | "ArrowLeft" => g.input.set_left(true),
                    "k" | "K" | "ArrowRight" => g.input.set_right(true),
                    " " => g.input.trigger_shield(),
                    "Escape" | "p" | "P" => g.input.trigger_pause(),
                    "m" | "M" => g.input.trigger_music(),
                    "o" | "O" => g.input.trigger_outline(),
                    "Enter" => {
                        // Audio needs a user gesture before it may start.
                        g.audio.resume();
                        let now = js_sys::Date::now();
                        match g.session.phase {
                            GamePhase::Menu => g.session.start(now),
                            GamePhase::GameOver if !g.session.awaiting_name_entry() => {
                                g.session.reset_game(now)
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "j" | "J" | "ArrowLeft" => g.input.set_left(false),
                    "k" | "K" | "ArrowRight" => g.input.set_right(false),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire a click handler to a button by element id.
    fn on_click<F: FnMut() + 'static>(id: &str, mut handler: F) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let difficulties = [
            ("diff-easy", Difficulty::Easy),
            ("diff-medium", Difficulty::Medium),
            ("diff-hard", Difficulty::Hard),
        ];
        for (id, difficulty) in difficulties {
            let game = game.clone();
            on_click(id, move || {
                let mut g = game.borrow_mut();
                g.input.select_difficulty(difficulty);
                g.audio.play(cube_runner::audio::SoundEffect::MenuSelect);
            });
        }

        let themes = [
            ("theme-basic", Theme::Basic),
            ("theme-synthwave", Theme::Synthwave),
            ("theme-sky", Theme::Sky),
        ];
        for (id, theme) in themes {
            let game = game.clone();
            on_click(id, move || {
                let mut g = game.borrow_mut();
                g.input.select_theme(theme);
                g.audio.play(cube_runner::audio::SoundEffect::MenuSelect);
            });
        }

        {
            let game = game.clone();
            on_click("start-btn", move || {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.session.start(js_sys::Date::now());
            });
        }

        {
            let game = game.clone();
            on_click("restart-btn", move || {
                game.borrow_mut().session.reset_game(js_sys::Date::now());
            });
        }

        {
            let game = game.clone();
            on_click("menu-btn", move || {
                game.borrow_mut().session.main_menu();
            });
        }

        on_click("submit-score-btn", move || {
            game.borrow_mut().submit_pending_name();
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.phase == GamePhase::Playing {
                        g.input.trigger_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.session.phase == GamePhase::Playing {
                    g.input.trigger_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cube Runner (native) starting...");

    // Headless demo: a few seconds of scripted weaving, then a crash to
    // show the game-over path. The real frontend is the web build.
    use cube_runner::consts::LANE_Z;
    use cube_runner::highscores::Leaderboard;
    use cube_runner::render::FrameSnapshot;
    use cube_runner::sim::{GamePhase, GameSession, ObstacleKind, TickInput};

    let mut leaderboard = Leaderboard::load();
    let mut session = GameSession::new(0xC0BE);
    session.start(0.0);

    let mut now = 0.0;
    for step in 0..600 {
        now += 16.0;
        let weave_left = (step / 120) % 2 == 0;
        let input = TickInput {
            left_held: weave_left,
            right_held: !weave_left,
            ..Default::default()
        };
        session.update(&input, now, &leaderboard);
        if session.phase == GamePhase::GameOver {
            break;
        }
    }

    if session.phase == GamePhase::Playing {
        session
            .field
            .push(session.player.lane_position, LANE_Z, ObstacleKind::Normal);
        now += 16.0;
        session.update(&TickInput::default(), now, &leaderboard);
    }

    let snapshot = FrameSnapshot::capture(&session, now);
    println!("phase: {:?}", snapshot.phase);
    println!("score: {} (best {})", snapshot.score, snapshot.high_score);
    println!("obstacles dodged: {}", session.obstacles_dodged);
    if session.awaiting_name_entry() {
        if let Some(rank) = session.submit_name("YOU", &mut leaderboard) {
            println!("leaderboard rank: #{}", rank);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
