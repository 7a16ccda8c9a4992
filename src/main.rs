//! Pipe Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop. On the
//! web a requestAnimationFrame callback drives one simulation tick per frame
//! and draws the scene to a 2d canvas. The native binary runs a headless
//! autopilot demo of the same simulation.

use pipe_dash::notify::{LogNotifier, NotifyConfig, ScoreNotifier, TelegramNotifier};

/// Build the game-over notifier from an inline JSON config baked in at
/// compile time, falling back to plain logging
fn make_notifier() -> Box<dyn ScoreNotifier> {
    match option_env!("PIPE_DASH_NOTIFY_JSON") {
        Some(json) => match serde_json::from_str::<NotifyConfig>(json) {
            Ok(config) => Box::new(TelegramNotifier::new(config)),
            Err(e) => {
                log::warn!("bad PIPE_DASH_NOTIFY_JSON, falling back to log notifier: {e}");
                Box::new(LogNotifier)
            }
        },
        None => Box::new(LogNotifier),
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pipe_dash::consts::*;
    use pipe_dash::notify::{self, ScoreNotifier};
    use pipe_dash::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        ctx: CanvasRenderingContext2d,
        notifier: Box<dyn ScoreNotifier>,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::new(seed),
                input: TickInput::default(),
                ctx,
                notifier: super::make_notifier(),
            }
        }

        /// One tick per animation frame
        fn frame(&mut self) {
            let input = self.input;
            self.input.flap = false; // one-shot, consumed by this tick
            let events = tick(&mut self.state, &input, PACE_MULTIPLIER);
            notify::dispatch(&events, self.notifier.as_ref());
            self.draw();
        }

        fn draw(&self) {
            let ctx = &self.ctx;

            // Sky
            ctx.set_fill_style_str("#70c5ce");
            ctx.fill_rect(0.0, 0.0, SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64);

            // Pipes
            ctx.set_fill_style_str("#2e8b57");
            for pipe in &self.state.pipes {
                let gap = pipe.gap_offset as f64;
                ctx.fill_rect(
                    pipe.x as f64,
                    gap - PIPE_HEIGHT as f64,
                    PIPE_WIDTH as f64,
                    PIPE_HEIGHT as f64,
                );
                ctx.fill_rect(
                    pipe.x as f64,
                    gap + PIPE_GAP as f64,
                    PIPE_WIDTH as f64,
                    PIPE_HEIGHT as f64,
                );
            }

            // Bird, rotated around its center by the tilt angle
            let bird = &self.state.bird;
            ctx.save();
            let _ = ctx.translate(
                (bird.pos.x + BIRD_WIDTH / 2.0) as f64,
                (bird.pos.y + BIRD_HEIGHT / 2.0) as f64,
            );
            let _ = ctx.rotate(bird.tilt.to_radians() as f64);
            ctx.set_fill_style_str("#ffd700");
            ctx.fill_rect(
                (-BIRD_WIDTH / 2.0) as f64,
                (-BIRD_HEIGHT / 2.0) as f64,
                BIRD_WIDTH as f64,
                BIRD_HEIGHT as f64,
            );
            ctx.restore();

            // Score and prompts
            ctx.set_fill_style_str("#000000");
            ctx.set_font("24px Arial");
            let _ = ctx.fill_text(&format!("Score: {}", self.state.score), 10.0, 30.0);

            match self.state.phase {
                GamePhase::Idle => {
                    let _ = ctx.fill_text("Click to flap", 140.0, SCREEN_HEIGHT as f64 / 2.0);
                }
                GamePhase::Over => {
                    ctx.set_font("36px Arial");
                    let _ = ctx.fill_text(
                        "Game Over",
                        SCREEN_WIDTH as f64 / 2.0 - 100.0,
                        SCREEN_HEIGHT as f64 / 2.0 - 50.0,
                    );
                    ctx.set_font("24px Arial");
                    let _ = ctx.fill_text(
                        &format!("Score: {}", self.state.score),
                        SCREEN_WIDTH as f64 / 2.0 - 50.0,
                        SCREEN_HEIGHT as f64 / 2.0 + 20.0,
                    );
                }
                GamePhase::Running => {}
            }
        }
    }

    fn setup_input(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(canvas) = document.get_element_by_id("canvas") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.flap = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.code() == "Space" {
                game.borrow_mut().input.flap = true;
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game.borrow_mut().frame();
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pipe Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, ctx)));
        log::info!("Session seed: {seed}");

        setup_input(game.clone());
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pipe_dash::consts::*;
    use pipe_dash::notify;
    use pipe_dash::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Pipe Dash (native) starting...");

    let notifier: Box<dyn ScoreNotifier> = match std::env::var("PIPE_DASH_NOTIFY") {
        Ok(path) => match NotifyConfig::from_file(&path) {
            Ok(config) => Box::new(TelegramNotifier::new(config)),
            Err(e) => {
                log::warn!("could not load notify config {path}: {e}");
                Box::new(LogNotifier)
            }
        },
        Err(_) => make_notifier(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    log::info!("Headless demo run, seed {seed}");

    // Autopilot: flap whenever the bird sinks below the next gap's center
    let mut ticks = 0u32;
    while ticks < FPS * 600 {
        let flap = if state.phase == GamePhase::Running {
            let target = state
                .pipes
                .iter()
                .find(|p| !p.passed)
                .map(|p| p.gap_offset as f32 + PIPE_GAP / 2.0)
                .unwrap_or(SCREEN_HEIGHT / 2.0);
            state.bird.pos.y + BIRD_HEIGHT / 2.0 > target
        } else {
            ticks == 0 // single activate to start the run
        };

        let events = tick(&mut state, &TickInput { flap }, PACE_MULTIPLIER);
        notify::dispatch(&events, notifier.as_ref());
        if state.phase == GamePhase::Over {
            break;
        }
        ticks += 1;
    }

    println!("Demo finished after {ticks} ticks, score {}", state.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
