use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{FieldConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::AppError;
use crate::frame_loop::{AnimationLoop, FrameRequester};
use crate::gpu::{
    frame_texture_format, EguiOverlay, FrameTexture, GpuContext, OverlayFrame, PresentPipeline,
};
use crate::raster::{Canvas, FrameRenderer};
use crate::simulation::{correlate, CorrelationReport, ParameterStore, ParticleField, CORRELATIONS};
use crate::ui::{show_side_panel, PanelState};

/// Everything needed to put a CPU frame and the UI on screen
struct Graphics {
    gpu: GpuContext,
    texture: FrameTexture,
    pipeline: PresentPipeline,
    bind_group: wgpu::BindGroup,
    overlay: EguiOverlay,
    pixels: Vec<[u8; 4]>,
}

impl Graphics {
    fn new(window: Arc<Window>) -> Result<Self, AppError> {
        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;
        let size = window.inner_size();

        let texture = FrameTexture::new(
            &gpu.device,
            size.width,
            size.height,
            frame_texture_format(gpu.format()),
        );
        let pipeline = PresentPipeline::new(&gpu.device, gpu.format());
        let bind_group = pipeline.create_bind_group(&gpu.device, &texture);
        let overlay = EguiOverlay::new(&gpu.device, gpu.format(), &window);

        Ok(Self {
            gpu,
            texture,
            pipeline,
            bind_group,
            overlay,
            pixels: Vec::new(),
        })
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if self.gpu.resize(size) {
            self.texture = FrameTexture::new(
                &self.gpu.device,
                size.width,
                size.height,
                frame_texture_format(self.gpu.format()),
            );
            self.bind_group = self.pipeline.create_bind_group(&self.gpu.device, &self.texture);
        }
    }

    fn present(&mut self, frame: &Canvas, ui: &OverlayFrame) {
        self.overlay.update_textures(&self.gpu.device, &self.gpu.queue, ui);
        if !frame.is_empty() {
            self.draw(frame, ui);
        }
        self.overlay.free_textures(ui);
    }

    fn draw(&mut self, frame: &Canvas, ui: &OverlayFrame) {
        frame.write_rgba8(&mut self.pixels);
        self.texture.upload(&self.gpu.queue, &self.pixels);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.surface.configure(&self.gpu.device, &self.gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        self.pipeline.draw(&mut encoder, &view, &self.bind_group);
        let ui_commands = self.overlay.paint(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &view,
            ui,
            self.gpu.size_in_pixels(),
        );

        self.gpu
            .queue
            .submit(ui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
    }
}

/// The draw loop and the one rule for starting it: a requester is attached
/// and the surface has area
struct DrawLoop<R: FrameRequester + ?Sized = Window> {
    requester: Option<Arc<R>>,
    animation: Option<AnimationLoop<R>>,
}

impl<R: FrameRequester + ?Sized> DrawLoop<R> {
    fn new() -> Self {
        Self {
            requester: None,
            animation: None,
        }
    }

    fn attach(&mut self, requester: Arc<R>) {
        self.requester = Some(requester);
    }

    fn is_running(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.is_running())
    }

    /// Start the loop unless it is already running or there is nothing to draw on
    fn activate(&mut self, has_area: bool) {
        if self.is_running() || !has_area {
            return;
        }
        if let Some(requester) = &self.requester {
            self.animation = Some(AnimationLoop::start(requester.clone()));
        }
    }

    fn deactivate(&mut self) {
        // Dropping the handle cancels the loop
        self.animation = None;
    }

    fn frame_finished(&mut self) {
        if let Some(animation) = &mut self.animation {
            animation.frame_finished();
        }
    }
}

/// Application state
pub struct App {
    config: FieldConfig,
    window: Option<Arc<Window>>,
    graphics: Option<Graphics>,
    field: Option<ParticleField>,
    renderer: Option<FrameRenderer>,
    draw_loop: DrawLoop,
    store: ParameterStore,
    report: CorrelationReport,
    panel: PanelState,
    paused: bool,
    fps_counter: FpsCounter,
    error: Option<AppError>,
}

impl App {
    pub fn new(config: FieldConfig) -> Self {
        let store = ParameterStore::default();
        let report = correlate(store.quantum(), store.buddhist(), &CORRELATIONS);
        Self {
            config,
            window: None,
            graphics: None,
            field: None,
            renderer: None,
            draw_loop: DrawLoop::new(),
            store,
            report,
            panel: PanelState::default(),
            paused: false,
            fps_counter: FpsCounter::new(),
            error: None,
        }
    }

    /// Setup error recorded while the event loop was running, if any
    pub fn into_result(self) -> Result<(), AppError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        log::info!("Initializing Two Truths field...");

        let window_attrs = Window::default_attributes()
            .with_title("Two Truths & Quantum Reality - Initializing...")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let graphics = Graphics::new(window.clone())?;
        let size = window.inner_size();

        log::info!("Spawning {} particles...", self.config.particle_count);
        let field = ParticleField::new(self.config.clone(), size.width, size.height);
        let renderer = FrameRenderer::new(size.width, size.height);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Tab: Show/hide parameter panel");
        log::info!("  Mouse: Drag panel sliders");
        log::info!("  Up/Down: Select parameter");
        log::info!("  Left/Right: Adjust selected parameter");
        log::info!("  R: Reset parameters");
        log::info!("  Space: Pause/resume motion");
        log::info!("  Escape: Quit");

        self.draw_loop.attach(window.clone());
        self.window = Some(window);
        self.graphics = Some(graphics);
        self.field = Some(field);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn has_area(&self) -> bool {
        self.field.as_ref().is_some_and(|f| f.has_area())
    }

    /// Every start of the draw loop goes through here
    fn activate(&mut self) {
        let has_area = self.has_area();
        self.draw_loop.activate(has_area);
    }

    fn redraw(&mut self) {
        if !self.draw_loop.is_running() {
            return;
        }
        if !self.has_area() {
            self.draw_loop.deactivate();
            return;
        }
        let (Some(window), Some(field), Some(renderer), Some(graphics)) = (
            self.window.as_ref(),
            self.field.as_mut(),
            self.renderer.as_mut(),
            self.graphics.as_mut(),
        ) else {
            return;
        };

        if !self.paused {
            field.step(self.store.quantum(), self.store.buddhist());
        }

        let frame = renderer.render(field.particles(), self.store.quantum(), self.store.buddhist());

        let (panel, store, report) = (&mut self.panel, &mut self.store, &self.report);
        let mut changed = false;
        let ui = graphics.overlay.run(window, |ctx| {
            changed |= show_side_panel(ctx, panel, store, report);
        });

        graphics.present(frame, &ui);
        self.draw_loop.frame_finished();

        if changed {
            self.parameters_changed();
        }

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                let paused = if self.paused { " [Paused]" } else { "" };
                window.set_title(&format!(
                    "Two Truths & Quantum Reality - {:.0} FPS - harmony {:.0}%{}",
                    fps,
                    self.report.harmony * 100.0,
                    paused
                ));
            }
        }
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        log::info!("Window resized to {}x{}", size.width, size.height);

        // The ensemble is rebuilt for the new bounds; no frame may run on
        // the old one in between
        self.draw_loop.deactivate();

        if let Some(graphics) = &mut self.graphics {
            graphics.resize(size);
        }
        if let Some(field) = &mut self.field {
            field.resize(size.width, size.height);
        }
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(size.width, size.height);
        }

        self.activate();
    }

    fn parameters_changed(&mut self) {
        self.report = correlate(self.store.quantum(), self.store.buddhist(), &CORRELATIONS);

        for entry in &self.report.entries {
            log::debug!(
                "{} <-> {}: {:.2} (base {:.2})",
                entry.spec.buddhist.label(),
                entry.spec.quantum.label(),
                entry.current,
                entry.spec.base_strength
            );
        }
        log::debug!("Sync: {:.2}", self.report.sync);

        let selected = self.panel.selected();
        log::info!(
            "{} = {:.2}, harmony {:.0}%",
            selected.label(),
            self.store.get(selected),
            self.report.harmony * 100.0
        );
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Tab => {
                self.panel.toggle();
                log::info!("Parameter panel: {}", if self.panel.open { "OPEN" } else { "CLOSED" });
            }

            KeyCode::ArrowUp => {
                self.panel.select_prev();
                log::info!("Selected {}", self.panel.selected().label());
            }
            KeyCode::ArrowDown => {
                self.panel.select_next();
                log::info!("Selected {}", self.panel.selected().label());
            }

            KeyCode::ArrowLeft => {
                if self.panel.nudge(&mut self.store, -1) {
                    self.parameters_changed();
                }
            }
            KeyCode::ArrowRight => {
                if self.panel.nudge(&mut self.store, 1) {
                    self.parameters_changed();
                }
            }

            KeyCode::KeyR => {
                self.store.reset();
                log::info!("Parameters reset");
                self.parameters_changed();
            }

            KeyCode::Space => {
                self.paused = !self.paused;
                let t = self.field.as_ref().map_or(0.0, |f| f.time());
                log::info!(
                    "Motion: {} at t = {:.2}",
                    if self.paused { "PAUSED" } else { "RUNNING" },
                    t
                );
            }

            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                log::error!("Initialization failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
                return;
            }
        }
        self.activate();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.draw_loop.deactivate();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match (&self.window, &mut self.graphics) {
            (Some(window), Some(graphics)) => graphics.overlay.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                self.draw_loop.deactivate();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            self.draw_loop.deactivate();
                            event_loop.exit();
                        } else if !consumed || key_code == KeyCode::Tab {
                            // A focused slider keeps its own arrow keys
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size);
            }
            WindowEvent::Occluded(occluded) => {
                if occluded {
                    self.draw_loop.deactivate();
                } else {
                    self.activate();
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.draw_loop.deactivate();
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_loop::testing::CountingRequester;

    #[test]
    fn test_new_app_has_default_report() {
        let app = App::new(FieldConfig::default());
        assert_eq!(app.report.entries.len(), CORRELATIONS.len());
        assert!((app.report.harmony - 0.90).abs() < 1e-6);
        assert!(!app.draw_loop.is_running());
    }

    #[test]
    fn test_activate_without_window_stays_idle() {
        let mut app = App::new(FieldConfig::default());
        app.activate();
        assert!(!app.draw_loop.is_running());
    }

    #[test]
    fn test_keys_update_parameters_and_report() {
        let mut app = App::new(FieldConfig::default());
        let before = app.report.harmony;

        app.handle_key(KeyCode::ArrowRight);
        assert!((app.store.quantum().superposition - 0.51).abs() < 1e-6);
        assert!(app.report.harmony < before);

        app.handle_key(KeyCode::KeyR);
        assert_eq!(app.store, ParameterStore::default());
        assert!((app.report.harmony - before).abs() < 1e-6);
    }

    #[test]
    fn test_tab_and_space_toggle() {
        let mut app = App::new(FieldConfig::default());
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Space);
        assert!(app.panel.open);
        assert!(app.paused);
    }

    #[test]
    fn test_redraw_without_loop_is_noop() {
        let mut app = App::new(FieldConfig::default());
        app.redraw();
        assert!(app.field.is_none());
    }

    fn attached() -> (DrawLoop<CountingRequester>, Arc<CountingRequester>) {
        let requester = Arc::new(CountingRequester::default());
        let mut draw_loop = DrawLoop::new();
        draw_loop.attach(requester.clone());
        (draw_loop, requester)
    }

    #[test]
    fn test_draw_loop_needs_a_requester() {
        let mut draw_loop: DrawLoop<CountingRequester> = DrawLoop::new();
        draw_loop.activate(true);
        assert!(!draw_loop.is_running());
    }

    #[test]
    fn test_activate_is_idempotent() {
        let (mut draw_loop, requester) = attached();
        draw_loop.activate(true);
        draw_loop.activate(true);
        assert!(draw_loop.is_running());
        assert_eq!(requester.requests.get(), 1);
    }

    #[test]
    fn test_zero_area_never_starts() {
        let (mut draw_loop, requester) = attached();
        draw_loop.activate(false);
        draw_loop.frame_finished();
        assert!(!draw_loop.is_running());
        assert_eq!(requester.requests.get(), 0);
    }

    #[test]
    fn test_resize_to_zero_stops_requests() {
        let (mut draw_loop, requester) = attached();
        draw_loop.activate(true);
        draw_loop.frame_finished();
        assert_eq!(requester.requests.get(), 2);

        // Resize: cancel, rebuild, restart only with area
        draw_loop.deactivate();
        draw_loop.activate(false);
        draw_loop.frame_finished();
        draw_loop.frame_finished();

        assert!(!draw_loop.is_running());
        assert_eq!(requester.requests.get(), 2);
    }

    #[test]
    fn test_resize_back_restarts() {
        let (mut draw_loop, requester) = attached();
        draw_loop.activate(true);
        draw_loop.deactivate();
        draw_loop.activate(false);

        draw_loop.deactivate();
        draw_loop.activate(true);
        draw_loop.frame_finished();

        assert!(draw_loop.is_running());
        assert_eq!(requester.requests.get(), 3);
    }

    #[test]
    fn test_unoccluded_at_zero_area_stays_stopped() {
        let (mut draw_loop, requester) = attached();
        draw_loop.activate(true);

        // Occluded, then shrunk to nothing, then visible again
        draw_loop.deactivate();
        draw_loop.activate(false);
        draw_loop.activate(false);

        assert!(!draw_loop.is_running());
        assert_eq!(requester.requests.get(), 1);
    }

    #[test]
    fn test_suspend_and_close_cancel_the_chain() {
        let (mut draw_loop, requester) = attached();
        draw_loop.activate(true);
        draw_loop.deactivate();
        draw_loop.frame_finished();
        assert_eq!(requester.requests.get(), 1);

        // Resume restarts the chain
        draw_loop.activate(true);
        assert_eq!(requester.requests.get(), 2);
        draw_loop.deactivate();
        assert!(!draw_loop.is_running());
        assert_eq!(Arc::strong_count(&requester), 2);
    }

    #[test]
    fn test_fps_counter_waits_a_second() {
        let mut counter = FpsCounter::new();
        assert!(counter.tick().is_none());
    }
}
