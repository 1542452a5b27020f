//! Portfolio Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use portfolio_runner::audio::AudioManager;
    use portfolio_runner::platform::web::DomPresenter;
    use portfolio_runner::platform::{Intent, intent_for_key, surface_for_element_id};
    use portfolio_runner::renderer::CanvasRenderer;
    use portfolio_runner::sim::SectionId;
    use portfolio_runner::{Game, Tuning};

    type WebGame = Game<DomPresenter, AudioManager>;

    /// Same time base as animation-frame timestamps
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn missing(what: &str) -> JsValue {
        JsValue::from_str(&format!("missing {what}"))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Portfolio Runner starting...");

        let window = web_sys::window().ok_or_else(|| missing("window"))?;
        let document = window.document().ok_or_else(|| missing("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| missing("#gameCanvas"))?
            .dyn_into()?;

        // The canvas element defines the playfield width
        let mut tuning = Tuning::from_json_or_default(canvas.get_attribute("data-tuning").as_deref());
        if canvas.width() > 0 {
            tuning.viewport_width = canvas.width() as f32;
        }

        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(tuning.sound_enabled);
        let presenter = DomPresenter::new(document.clone(), CanvasRenderer::new(canvas.clone())?);
        let game = Rc::new(RefCell::new(Game::new(tuning, seed, presenter, audio, now_ms())));

        setup_keyboard(&document, game.clone());
        setup_jump_inputs(&canvas, &document, game.clone());
        setup_buttons(&document, game.clone());
        setup_menu_sections(&document, game.clone())?;
        setup_modal_close(&window, &document, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Portfolio Runner ready");
        Ok(())
    }

    /// Attach a click handler to `#id`, warning when the element is absent
    fn on_click<F>(document: &Document, id: &str, game: &Rc<RefCell<WebGame>>, mut handler: F)
    where
        F: FnMut(&mut WebGame, &MouseEvent) + 'static,
    {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing element #{}", id);
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            handler(&mut game.borrow_mut(), &event);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<WebGame>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(intent) = intent_for_key(&event.code(), &event.key()) else {
                return;
            };
            let mut g = game.borrow_mut();
            // Leave keys alone on the instructions and end screens
            if !g.core().state.is_running() {
                return;
            }
            event.prevent_default();
            g.intent(intent);
        });
        let _ =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_jump_inputs(canvas: &HtmlCanvasElement, document: &Document, game: Rc<RefCell<WebGame>>) {
        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().intent(Intent::Jump);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                game.borrow_mut().intent(Intent::Jump);
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        on_click(document, "jumpButton", &game, |g, event| {
            event.prevent_default();
            g.intent(Intent::Jump);
        });
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<WebGame>>) {
        on_click(document, "startGame", &game, |g, _| g.start(now_ms()));
        on_click(document, "playAgain", &game, |g, _| g.restart(now_ms()));
        on_click(document, "restartGame", &game, |g, _| g.restart(now_ms()));
        on_click(document, "enableAudio", &game, |g, _| {
            g.toggle_sound();
        });
        on_click(document, "pauseButton", &game, |g, _| g.intent(Intent::TogglePause));
        on_click(document, "resumeGame", &game, |g, _| g.resume());
        on_click(document, "menuButton", &game, |g, _| g.intent(Intent::OpenMenu));
        on_click(document, "closeMenu", &game, |g, _| g.close_menu());
    }

    fn setup_menu_sections(document: &Document, game: Rc<RefCell<WebGame>>) -> Result<(), JsValue> {
        let buttons = document.query_selector_all(".menu-section-btn")?;
        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let key = btn.get_attribute("data-section").unwrap_or_default();
            let Some(section) = SectionId::from_key(&key) else {
                log::warn!("Menu button has unknown section {:?}", key);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().open_section_from_menu(section);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        Ok(())
    }

    fn setup_modal_close(
        window: &web_sys::Window,
        document: &Document,
        game: Rc<RefCell<WebGame>>,
    ) -> Result<(), JsValue> {
        // Close buttons inside each overlay
        let close_buttons = document.query_selector_all(".close")?;
        for i in 0..close_buttons.length() {
            let Some(btn) = close_buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let surface = btn
                .closest(".modal")
                .ok()
                .flatten()
                .and_then(|modal| surface_for_element_id(&modal.id()));
            let Some(surface) = surface else {
                log::warn!("Close button outside a known overlay");
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().close_surface(surface, now_ms());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicks on an overlay backdrop
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if !target.matches(".modal").unwrap_or(false) {
                return;
            }
            if let Some(surface) = surface_for_element_id(&target.id()) {
                game.borrow_mut().backdrop_click(surface, now_ms());
            }
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play in a browser");

    let outcome = autopilot::run(42);
    println!(
        "\nAutopilot finished: {:?} after {:.1}s, lives {}, sections {}/{}",
        outcome.state, outcome.seconds, outcome.lives, outcome.progress, outcome.max_progress
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run that plays the game with a simple jump heuristic
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use std::ops::RangeInclusive;

    use portfolio_runner::platform::{Intent, Presenter};
    use portfolio_runner::sim::{FrameSnapshot, SessionState, Surface};
    use portfolio_runner::{Game, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 180;
    /// Jump once the next block is this far ahead of the player
    const JUMP_WINDOW: RangeInclusive<f32> = 150.0..=190.0;

    pub struct Outcome {
        pub state: SessionState,
        pub seconds: f64,
        pub lives: u32,
        pub progress: usize,
        pub max_progress: usize,
    }

    /// Logs overlays instead of drawing them
    #[derive(Default)]
    struct LogPresenter {
        open: Vec<Surface>,
    }

    impl Presenter for LogPresenter {
        fn render(&mut self, _frame: &FrameSnapshot) {}

        fn show_surface(&mut self, surface: Surface) {
            log::info!("show {:?}", surface);
            if !self.open.contains(&surface) {
                self.open.push(surface);
            }
        }

        fn hide_surface(&mut self, surface: Surface) {
            self.open.retain(|s| *s != surface);
        }

        fn set_counters(&mut self, lives: u32, progress: usize, max_progress: usize) {
            log::info!("lives {} | progress {}/{}", lives, progress, max_progress);
        }
    }

    pub fn run(seed: u64) -> Outcome {
        let mut game = Game::new(Tuning::default(), seed, LogPresenter::default(), (), 0.0);
        let mut now = 0.0;
        game.start(now);

        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            game.frame(now);

            let state = game.core().state;
            match state {
                SessionState::Running => {
                    let core = game.core();
                    let px = core.player.pos.x;
                    let block_ahead = core
                        .obstacles
                        .iter()
                        .any(|o| !o.collected && JUMP_WINDOW.contains(&(o.pos.x - px)));
                    if block_ahead {
                        game.intent(Intent::Jump);
                    }
                }
                SessionState::PausedForCollect => {
                    let sections: Vec<Surface> = game
                        .presenter()
                        .open
                        .iter()
                        .copied()
                        .filter(|s| matches!(s, Surface::Section(_)))
                        .collect();
                    for surface in sections {
                        game.close_surface(surface, now);
                    }
                }
                SessionState::Won | SessionState::GameOver => break,
                _ => {}
            }
        }

        let core = game.core();
        Outcome {
            state: core.state,
            seconds: now / 1000.0,
            lives: core.lives,
            progress: core.progress(),
            max_progress: core.tuning.max_progress,
        }
    }
}
