use std::sync::Arc;
use std::time::Duration;

use glam::IVec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
#[cfg(not(windows))]
use winit::event::{DeviceEvent, DeviceId};
#[cfg(not(windows))]
use winit::event_loop::DeviceEvents;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use crate::assets::Assets;
use crate::audio::AudioOutput;
use crate::click::ClickState;
use crate::config::Config;
#[cfg(not(windows))]
use crate::cursor::CursorTracker;
use crate::ecs::components::SpriteCache;
use crate::ecs::systems::{self, Effect, TickInput};
use crate::error::{NekoError, Result};
use crate::pet::{self, SpriteKey};
#[cfg(windows)]
use crate::platform;

/// Target simulation tick rate (seconds per tick).
const TICK_RATE: f64 = 1.0 / 50.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// How often to log tick rate (seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Tick timing
// ---------------------------------------------------------------------------

struct TickStats {
    tick_count: u64,
    last_log_time: Instant,
    ticks_since_log: u32,
    draws_since_log: u32,
}

impl TickStats {
    fn new() -> Self {
        Self {
            tick_count: 0,
            last_log_time: Instant::now(),
            ticks_since_log: 0,
            draws_since_log: 0,
        }
    }

    fn record_tick(&mut self) {
        self.tick_count += 1;
        self.ticks_since_log += 1;
    }

    fn record_draw(&mut self) {
        self.draws_since_log += 1;
    }

    fn maybe_log(&mut self) {
        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= STATS_LOG_INTERVAL {
            log::info!(
                "TPS: {:.1} | redraws: {} | total ticks: {}",
                self.ticks_since_log as f64 / elapsed,
                self.draws_since_log,
                self.tick_count,
            );
            self.last_log_time = Instant::now();
            self.ticks_since_log = 0;
            self.draws_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    config: Config,
    assets: Assets,

    window: Option<Arc<Window>>,
    gpu: Option<crate::render::GpuState>,
    audio: Option<AudioOutput>,

    // ECS (one pet)
    world: hecs::World,

    // Input
    click: ClickState,
    /// Global cursor estimate; Windows asks the OS directly instead.
    #[cfg(not(windows))]
    cursor: CursorTracker,

    // Fixed timestep
    last_frame_time: Option<Instant>,
    accumulator: f64,
    stats: TickStats,

    monitor: IVec2,

    // Effects buffer (reused each tick)
    effects: Vec<Effect>,
    /// Sprite waiting to be presented on the next redraw.
    pending_draw: Option<SpriteKey>,

    /// Setup failure to report once the event loop returns.
    fatal: Option<NekoError>,
}

impl App {
    fn new(config: Config, assets: Assets) -> Self {
        Self {
            audio: AudioOutput::new(config.volume, config.quiet),
            config,
            assets,
            window: None,
            gpu: None,
            world: hecs::World::new(),
            click: ClickState::new(),
            #[cfg(not(windows))]
            cursor: CursorTracker::default(),
            last_frame_time: None,
            accumulator: 0.0,
            stats: TickStats::new(),
            monitor: IVec2::ZERO,
            effects: Vec::with_capacity(4),
            pending_draw: None,
            fatal: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .ok_or(NekoError::NoMonitor)?;
        let screen = monitor.size();
        self.monitor = IVec2::new(screen.width as i32, screen.height as i32);

        let side = (pet::SPRITE_SIZE as f64 * self.config.scale).round().max(1.0) as u32;
        let start = self.monitor / 2;

        // Transparency on Windows comes from DirectComposition instead of
        // WS_EX_LAYERED, see platform::win32::make_overlay.
        let attrs = WindowAttributes::default()
            .with_title("Neko")
            .with_decorations(false)
            .with_resizable(false)
            .with_transparent(cfg!(not(windows)))
            .with_visible(false)
            .with_active(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_inner_size(PhysicalSize::new(side, side))
            .with_position(PhysicalPosition::new(start.x, start.y));

        let window = Arc::new(event_loop.create_window(attrs)?);

        #[cfg(windows)]
        platform::win32::setup_overlay(&window);

        if let Err(e) = window.set_cursor_hittest(!self.config.mouse_passthrough) {
            log::warn!("Cursor passthrough unsupported: {e}");
        }

        log::info!(
            "Pet window {}x{} on {:?} ({}x{})",
            side,
            side,
            monitor.name().unwrap_or_default(),
            screen.width,
            screen.height,
        );

        self.gpu = Some(crate::render::GpuState::new(window.clone(), &self.assets)?);
        pet::spawn_pet(&mut self.world, start);
        // Start with the cursor "on" the pet until the first real position arrives.
        #[cfg(not(windows))]
        {
            self.cursor = CursorTracker::new(start + IVec2::splat(side as i32 / 2), self.monitor);
        }

        window.set_visible(true);
        self.window = Some(window);
        Ok(())
    }

    #[cfg(windows)]
    fn cursor_position(&self) -> IVec2 {
        platform::win32::get_mouse_pos()
    }

    #[cfg(not(windows))]
    fn cursor_position(&self) -> IVec2 {
        self.cursor.position()
    }

    /// Run fixed-timestep simulation ticks.
    fn run_fixed_update(&mut self, dt: f64) {
        self.accumulator = (self.accumulator + dt).min(MAX_ACCUMULATOR);

        while self.accumulator >= TICK_RATE {
            let input = TickInput {
                cursor: self.cursor_position(),
                clicked: self.click.take(),
                monitor: self.monitor,
            };

            self.effects.clear();
            systems::tick(
                &mut self.world,
                &input,
                self.config.speed,
                self.config.scale as f32,
                &mut self.effects,
            );
            self.apply_effects();

            self.accumulator -= TICK_RATE;
            self.stats.record_tick();
        }
    }

    /// Sprite currently on screen, for repainting after a resize.
    fn last_drawn(&self) -> Option<SpriteKey> {
        self.world
            .query::<&SpriteCache>()
            .iter()
            .find_map(|(_, cache)| cache.last)
    }

    fn apply_effects(&mut self) {
        for effect in self.effects.drain(..) {
            match effect {
                Effect::MoveWindow(pos) => {
                    if let Some(w) = &self.window {
                        w.set_outer_position(PhysicalPosition::new(pos.x, pos.y));
                    }
                }
                Effect::PlayCue(cue) => {
                    log::debug!("cue {:?}", cue);
                    if let (Some(audio), Some(clip)) = (&mut self.audio, self.assets.clip(cue)) {
                        audio.play(clip);
                    }
                }
                Effect::Redraw(key) => {
                    self.pending_draw = Some(key);
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            let dt = now.duration_since(last).as_secs_f64();
            self.run_fixed_update(dt);
        }
        self.last_frame_time = Some(now);
        self.stats.maybe_log();

        // Only present when the animation asked for a new sprite.
        if self.pending_draw.is_some() {
            if let Some(w) = &self.window {
                w.request_redraw();
            }
        }

        let remaining = (TICK_RATE - self.accumulator).max(0.0);
        event_loop.set_control_flow(ControlFlow::WaitUntil(
            now + Duration::from_secs_f64(remaining),
        ));
    }

    #[cfg(not(windows))]
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.cursor.moved_by(delta);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                self.pending_draw = self
                    .pending_draw
                    .or_else(|| self.last_drawn());
            }
            #[cfg(not(windows))]
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(origin) = self.window.as_ref().and_then(|w| w.inner_position().ok()) {
                    self.cursor.moved_to(IVec2::new(
                        origin.x + position.x as i32,
                        origin.y + position.y as i32,
                    ));
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.click.update(state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                if let (Some(key), Some(gpu)) = (self.pending_draw.take(), &self.gpu) {
                    gpu.draw_sprite(key);
                    self.stats.record_draw();
                }
            }
            _ => {}
        }
    }
}

/// Entry point: create the event loop and run until the window closes.
pub fn run(config: Config) -> Result<()> {
    let assets = Assets::load(&config.assets)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    // Raw motion keeps the cursor tracked once it leaves the window.
    #[cfg(not(windows))]
    event_loop.listen_device_events(DeviceEvents::Always);

    let mut app = App::new(config, assets);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
