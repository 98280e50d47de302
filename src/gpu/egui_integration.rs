//! egui drawn over the presented frame.

use wgpu::{CommandBuffer, CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::event::WindowEvent;
use winit::window::Window;

/// One tessellated UI pass, ready for the GPU
pub struct OverlayFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
}

/// egui context, winit input state and wgpu renderer
pub struct EguiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl EguiOverlay {
    pub fn new(device: &Device, output_format: TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();

        let mut visuals = egui::Visuals::dark();
        visuals.window_shadow = egui::Shadow::NONE;
        visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_visuals(visuals);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            output_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Self { ctx, state, renderer }
    }

    /// Feed a window event to egui.
    ///
    /// Returns true if egui consumed it (a widget has keyboard focus, or the
    /// pointer is over the panel).
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run one UI pass and tessellate it
    pub fn run(&mut self, window: &Window, build_ui: impl FnMut(&egui::Context)) -> OverlayFrame {
        let raw_input = self.state.take_egui_input(window);
        let output = self.ctx.run(raw_input, build_ui);

        // Cursor icon, clipboard, links
        self.state.handle_platform_output(window, output.platform_output);

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        OverlayFrame {
            paint_jobs,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Upload new or changed UI textures. Must run for every UI pass, even
    /// one that is never drawn, or the font atlas goes missing.
    pub fn update_textures(&mut self, device: &Device, queue: &Queue, frame: &OverlayFrame) {
        for (id, delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
    }

    /// Draw the UI over `view`, keeping what is already there.
    ///
    /// Returns command buffers that must be submitted before `encoder`.
    pub fn paint(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        frame: &OverlayFrame,
        size_in_pixels: [u32; 2],
    ) -> Vec<CommandBuffer> {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };
        let commands =
            self.renderer
                .update_buffers(device, queue, encoder, &frame.paint_jobs, &screen);

        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        self.renderer.render(&mut pass, &frame.paint_jobs, &screen);

        commands
    }

    /// Release textures the UI dropped; call once the frame is submitted
    pub fn free_textures(&mut self, frame: &OverlayFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
