//! Sphere Catch entry point
//!
//! The browser build wires DOM events, WebGPU and Web Audio around an
//! `Arcade`. The native build runs a headless autoplay session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use sphere_catch::audio::{AudioManager, SoundEffect};
    use sphere_catch::consts::NOMINAL_FRAME_MS;
    use sphere_catch::hud::Screen;
    use sphere_catch::platform;
    use sphere_catch::renderer::RenderState;
    use sphere_catch::{Arcade, HighScores, Settings, Tuning};

    /// Everything the page needs between frames
    struct Game {
        arcade: Arcade,
        render_state: Option<RenderState>,
        audio: AudioManager,
        highscores: HighScores,
        settings: Settings,
        last_time: f64,
        /// An animation frame is scheduled
        loop_active: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                arcade: Arcade::new(tuning, seed),
                render_state: None,
                audio: AudioManager::new(&settings),
                highscores: HighScores::load(),
                settings,
                last_time: 0.0,
                loop_active: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn start(&mut self) -> bool {
            self.audio.resume();
            self.last_time = 0.0;
            self.arcade.start()
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Sound {}", if self.settings.muted { "off" } else { "on" });
        }

        fn track_fps(&mut self, dt_ms: f64) {
            self.frame_times[self.frame_index] = dt_ms;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();
            let avg = self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
            if avg > 0.0 {
                self.fps = (1000.0 / avg).round() as u32;
            }
        }

        fn render(&mut self) {
            let Some(render_state) = &mut self.render_state else {
                return;
            };
            match render_state.render_session(self.arcade.game().session()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(e) => log::error!("Render error: {:?}", e),
            }
        }

        /// Play queued cues and store a finished session
        fn flush_events(&mut self) {
            for cue in self.arcade.hud_mut().drain_cues() {
                self.audio.play(SoundEffect::from(cue));
            }

            if let Some(outcome) = self.arcade.hud_mut().take_outcome() {
                let rank =
                    self.highscores
                        .add_score(outcome.score, outcome.level, js_sys::Date::now());
                if let Some(rank) = rank {
                    log::info!("New high score #{}: {}", rank, outcome.score);
                    self.highscores.save();
                    self.audio.play(SoundEffect::HighScore);
                }
            }
        }

        fn update_hud(&self, document: &Document) {
            let hud = self.arcade.hud();
            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };
            let set_visible = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };

            set_text("hud-score", &hud.score.to_string());
            set_text("hud-lives", &hud.lives.to_string());
            set_text("hud-level", &hud.level.to_string());
            set_text("hud-spheres", &hud.sphere_count.to_string());
            if let Some(best) = self.highscores.top_score() {
                set_text("hud-best", &best.to_string());
            }

            set_visible("hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                set_text("hud-fps", &format!("{} FPS", self.fps));
            }

            set_visible("ready-panel", hud.screen == Screen::Ready);
            set_visible("game-over", hud.screen == Screen::GameOver);
            if let Some(outcome) = hud.last_outcome {
                set_text("final-score", &outcome.score.to_string());
                set_text("final-level", &outcome.level.to_string());
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Sphere Catch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::load();
        let volume = tuning.volume;
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, volume)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get device: {}", e)))?;

        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            g.render();
            g.update_hud(&document);
        }

        setup_input_handlers(&window, game.clone());
        setup_start_buttons(&document, game.clone());
        setup_focus_handlers(&window, game.clone());
        setup_resize(&window, canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        log::info!("Sphere Catch ready");
        Ok(())
    }

    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if platform::suppresses_default(&key) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if platform::is_mute_toggle(&key) && !event.repeat() {
                    g.toggle_mute();
                }
                g.arcade.key(&key, true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if platform::suppresses_default(&key) {
                    event.prevent_default();
                }
                game.borrow_mut().arcade.key(&key, false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let schedule = {
                    let mut g = game.borrow_mut();
                    if !g.start() {
                        return;
                    }
                    let idle = !g.loop_active;
                    g.loop_active = true;
                    idle
                };
                if schedule {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Window blur: keys released elsewhere never reach us
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.arcade.release_keys();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_pixel_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            let mut g = game.borrow_mut();
            if let Some(render_state) = &mut g.render_state {
                render_state.resize(width, height);
            }
            g.render();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();

            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                NOMINAL_FRAME_MS
            };
            g.last_time = time;
            g.track_fps(dt_ms);

            let running = g.arcade.frame(dt_ms);
            g.render();
            g.flush_events();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }

            g.loop_active = running;
            running
        };

        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sphere Catch (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    autoplay(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session steered toward the lowest sphere
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64) {
    use sphere_catch::consts::NOMINAL_FRAME_MS;
    use sphere_catch::{Arcade, HighScores, Tuning};

    // Ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    let mut arcade = Arcade::new(Tuning::default(), seed);
    arcade.start();

    let mut frames = 0;
    while frames < MAX_FRAMES {
        let session = arcade.game().session();
        let catcher = session.catcher.pos;
        let tolerance = session.catcher.speed;
        let target = session
            .objects
            .iter()
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|object| object.ground_pos() - catcher)
            .unwrap_or_default();

        arcade.key("ArrowLeft", target.x < -tolerance);
        arcade.key("ArrowRight", target.x > tolerance);
        arcade.key("ArrowUp", target.y < -tolerance);
        arcade.key("ArrowDown", target.y > tolerance);

        frames += 1;
        if !arcade.frame(NOMINAL_FRAME_MS) {
            break;
        }
    }

    let hud = arcade.hud_mut();
    log::info!(
        "Autoplay finished after {} frames: score {}, lives {}, level {}",
        frames,
        hud.score,
        hud.lives,
        hud.level
    );

    if let Some(outcome) = hud.take_outcome() {
        let mut highscores = HighScores::load();
        if let Some(rank) = highscores.add_score(outcome.score, outcome.level, 0.0) {
            log::info!("Would rank #{} on the leaderboard", rank);
        }
    }
}
