//! Gesture Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use gesture_runner::consts::*;
    use gesture_runner::gesture::{self, InputSlot};
    use gesture_runner::hud::{self, FpsCounter, GestureBadges, HudSnapshot};
    use gesture_runner::platform;
    use gesture_runner::renderer::{FollowCamera, SdfRenderState};
    use gesture_runner::sim::{GameState, autopilot_input, tick};
    use gesture_runner::{Settings, StartupError};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: SdfRenderState,
        camera: FollowCamera,
        input: InputSlot,
        settings: Settings,
        autopilot: bool,
        accumulator: f32,
        last_time: f64,
        fps: FpsCounter,
    }

    impl Game {
        /// Advance the simulation by one step
        fn step(&mut self) {
            let input = if self.autopilot {
                autopilot_input(&self.state)
            } else {
                self.input.latest()
            };
            tick(&mut self.state, &input);
            for event in &self.state.events {
                log::debug!("{:?}", event);
            }
        }

        /// Run simulation steps for this displayed frame
        fn update(&mut self, dt: f32, time: f64) {
            if self.settings.fixed_timestep {
                self.accumulator += dt.min(MAX_FRAME_DT);

                let mut substeps = 0;
                while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                    self.step();
                    self.accumulator -= SIM_DT;
                    substeps += 1;
                }
            } else {
                self.step();
            }

            self.camera.follow(self.state.player.pos);
            self.fps.record(time);
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let elapsed = (time / 1000.0) as f32;
            match self.render_state.render(&self.state, &self.camera, elapsed) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let fps = self.settings.show_fps.then(|| self.fps.fps());
            hud::dom::apply_snapshot(&HudSnapshot::from_state(&self.state, fps));
        }

        /// Match the back buffer and camera to the canvas size
        fn resize(&mut self, window: &web_sys::Window, canvas: &HtmlCanvasElement) {
            let viewport = platform::canvas_viewport(window, canvas, self.settings.quality);
            platform::apply_viewport(canvas, &viewport);
            self.render_state
                .resize(viewport.physical.0, viewport.physical.1);
            self.camera.set_aspect(viewport.aspect);
        }

        fn toggle_autopilot(&mut self) {
            self.autopilot = !self.autopilot;
            log::info!("Autopilot: {}", self.autopilot);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Gesture Runner starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
            hud::dom::show_fatal(&e.user_message());
        }
    }

    async fn start() -> Result<(), StartupError> {
        let window = platform::window()?;
        let document = platform::document(&window)?;

        let settings = Settings::load();
        let tuning = platform::page_tuning(&document);

        let canvas: HtmlCanvasElement = platform::element_by_id(&document, "canvas")?;
        let viewport = platform::canvas_viewport(&window, &canvas, settings.quality);
        platform::apply_viewport(&canvas, &viewport);

        let seed = platform::session_seed(settings.seed, js_sys::Date::now());
        log::info!("Game initialized with seed: {}", seed);

        // WebGPU first, WebGL2 fallback
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = SdfRenderState::new(
            surface,
            &adapter,
            viewport.physical.0,
            viewport.physical.1,
        )
        .await?;

        // Camera frames publish into the slot; the frame loop reads it
        let input = InputSlot::new();
        {
            let slot = input.clone();
            let gesture_tuning = tuning.gesture.clone();
            platform::tracking::start(&tuning, settings.show_landmarks, move |flat, hands| {
                let (classified, err) = gesture::classify_frame(flat, hands, &gesture_tuning);
                if let Some(e) = err {
                    log::warn!("Dropping gesture frame: {}", e);
                }
                slot.publish(classified);
                hud::dom::apply_badges(&GestureBadges::from_input(&classified));
            })
            .await?;
        }

        let state = GameState::with_tuning(seed, tuning);
        let mut camera = FollowCamera::new(viewport.aspect);
        camera.snap_to(state.player.pos);

        let game = Rc::new(RefCell::new(Game {
            state,
            render_state,
            camera,
            input,
            autopilot: settings.autopilot,
            settings,
            accumulator: 0.0,
            last_time: 0.0,
            fps: FpsCounter::default(),
        }));

        setup_resize_handler(&window, &canvas, game.clone());
        setup_keyboard(&window, game.clone());

        hud::dom::hide_loading();

        // Start game loop
        request_animation_frame(game);

        log::info!("Gesture Runner running!");
        Ok(())
    }

    fn setup_resize_handler(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        let window_clone = window.clone();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&window_clone, &canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let "i" | "I" = event.key().as_str() {
                game.borrow_mut().toggle_autopilot();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gesture_runner::Tuning;
    use gesture_runner::sim::run_autopilot;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);

    log::info!("Gesture Runner (native) headless run: seed {}, {} frames", seed, frames);
    log::info!("The playable game runs in the browser - use `trunk serve`");

    let summary = run_autopilot(seed, frames, Tuning::default());
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
