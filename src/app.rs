use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::SimConfig;
use crate::debug::timer::SystemPhase;
use crate::debug::{DebugStats, PanelSnapshot};
use crate::error::AppError;
use crate::hud::Hud;
use crate::input::{self, InputState, PlatformEvent};
use crate::pacing::FramePacer;
use crate::render::scene::FrameScene;
use crate::render::{FrameContext, GpuState};
use crate::sim::{Simulation, TickFlow};

const WINDOW_TITLE: &str = "Bee Garden";

/// Top-level application state.
struct App {
    config: SimConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    hud: Option<Hud>,

    sim: Simulation,
    rng: fastrand::Rng,

    // Held keys, plus discrete events queued until the next tick.
    input: InputState,
    pending: Vec<PlatformEvent>,

    pacer: FramePacer,
    debug: DebugStats,

    // Reusable draw lists (avoid per-frame allocation)
    scene: FrameScene,

    /// First fatal startup error, returned from `run` after the loop exits.
    fatal: Option<AppError>,
}

impl App {
    fn new(config: SimConfig) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            hud: None,
            sim: Simulation::new(config),
            rng: fastrand::Rng::new(),
            input: InputState::default(),
            pending: Vec::with_capacity(32),
            pacer: FramePacer::new(config.tick_hz),
            debug: DebugStats::new(),
            scene: FrameScene::new(),
            fatal: None,
        }
    }

    /// Create the window, GPU state and HUD.
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(self.config.width(), self.config.height()))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        log::info!(
            "Window created: {}x{} (scale {:.2})",
            size.width,
            size.height,
            window.scale_factor()
        );

        let gpu = GpuState::new(window.clone(), self.config.width(), self.config.height())?;
        log::info!("wgpu + rect pipeline initialized");

        self.hud = Some(Hud::new(&window, &gpu));
        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    /// Physical window size as a vector; zero before the window exists.
    fn window_px(&self) -> Vec2 {
        self.window.as_ref().map_or(Vec2::ZERO, |w| {
            let size = w.inner_size();
            Vec2::new(size.width as f32, size.height as f32)
        })
    }

    fn on_key(&mut self, key: PhysicalKey, pressed: bool) {
        match key {
            PhysicalKey::Code(KeyCode::F12) => {
                if self.debug.poll_toggle(pressed) {
                    log::info!("Debug panel {}", if self.debug.visible { "shown" } else { "hidden" });
                }
            }
            _ => {
                self.input.set_key(key, pressed);
            }
        }
    }

    /// Run one simulation tick if the pacer says it's time. Returns false
    /// once the simulation asked to quit.
    fn step(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let now = Instant::now();
        if self.pacer.is_due(now) {
            let delta = self.pacer.tick(now);
            if delta.measured_ms > 0.0 {
                self.debug.record_frame(delta.measured_ms as f64 / 1000.0);
            }

            let flow = self
                .sim
                .tick(self.pending.drain(..), &self.input, delta.sim_ms, &mut self.rng);
            if flow == TickFlow::Quit {
                return false;
            }

            if let Some(w) = &self.window {
                w.request_redraw();
            }
        }

        if let Some(deadline) = self.pacer.deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
        true
    }

    /// Draw the current simulation state: sprites, then the HUD on top.
    fn render(&mut self) {
        let Self {
            window,
            gpu,
            hud,
            sim,
            scene,
            debug,
            config,
            ..
        } = self;
        let (Some(window), Some(gpu), Some(hud)) = (window.as_ref(), gpu.as_mut(), hud.as_mut())
        else {
            return;
        };

        sim.timers.begin();
        scene.rebuild(sim);
        sim.timers.end(SystemPhase::BuildFrame);

        let panel = debug.visible.then(|| PanelSnapshot {
            fps: debug.fps,
            frame_time_avg: debug.frame_time_avg,
            frame_time_min: debug.frame_time_min,
            frame_time_max: debug.frame_time_max,
            frame_times: debug.frame_times.iter().copied().collect(),
            system_durations: sim.timers.durations_us,
            worker_count: sim.workers().len(),
            tick_count: sim.tick_count(),
            spawn_timer_ms: sim.spawn_timer(),
            spawn_interval_ms: config.spawn_interval_ms,
            contact: sim.contact(),
        });

        // Skipped frames are timed too; they are the slow ones.
        let drawn = sim.timers.time(SystemPhase::Render, || {
            draw_frame(window, gpu, hud, scene, config, panel.as_ref())
        });
        if drawn.is_none() {
            log::trace!("Frame skipped");
        }
    }
}

/// Upload sprites, draw them, paint the HUD over them and present. `None`
/// when no surface texture was available this frame.
fn draw_frame(
    window: &Window,
    gpu: &mut GpuState,
    hud: &mut Hud,
    scene: &FrameScene,
    config: &SimConfig,
    panel: Option<&PanelSnapshot>,
) -> Option<()> {
    gpu.update_instances(&scene.sprites);

    let FrameContext {
        output,
        view,
        mut encoder,
    } = gpu.begin_frame()?;

    gpu.draw_sprites(&mut encoder, &view, scene.clear_color);

    let logical = window
        .inner_size()
        .to_logical::<f32>(window.scale_factor());
    let points_per_unit = logical.width / config.width();

    let hud_frame = hud.run_frame(
        window,
        gpu.surface_config.width,
        gpu.surface_config.height,
        scene,
        points_per_unit,
        panel,
    );
    let extra = hud.prepare(&gpu.device, &gpu.queue, &mut encoder, &hud_frame);
    {
        let mut pass = GpuState::begin_egui_pass(&mut encoder, &view);
        hud.render(&mut pass, &hud_frame);
    }
    gpu.finish_frame(encoder, output, extra);
    hud.free_textures(&hud_frame);
    Some(())
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }
        if !self.step(event_loop) {
            log::info!(
                "Quit after {} ticks with {} workers",
                self.sim.tick_count(),
                self.sim.workers().len()
            );
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(hud), Some(window)) = (self.hud.as_mut(), self.window.as_ref()) {
            hud.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.pending.push(PlatformEvent::Quit);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.on_key(event.physical_key, event.state.is_pressed());
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pointer = input::to_virtual(
                    Vec2::new(position.x as f32, position.y as f32),
                    self.window_px(),
                    self.config.screen,
                );
                self.pending.push(PlatformEvent::PointerMoved(pointer));
            }
            WindowEvent::Focused(false) => {
                self.input.clear();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
    }
}

/// Entry point — create event loop and run until quit.
pub fn run() -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(SimConfig::default());
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
