//! egui layer drawn over the sprites: stat labels, the contact indicator
//! and the F12 debug panel, in that order.

use winit::window::Window;

use crate::debug::{self, PanelSnapshot};
use crate::render::scene::FrameScene;
use crate::render::GpuState;

/// Stat label font size in virtual pixels.
const LABEL_FONT_SIZE: f32 = 16.0;

/// egui context, winit glue and wgpu renderer.
pub struct Hud {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
}

/// Output of one egui pass, ready to upload and draw.
pub struct HudFrame {
    pub primitives: Vec<egui::epaint::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub screen_descriptor: egui_wgpu::ScreenDescriptor,
}

impl Hud {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    /// Forward a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    /// Run the egui frame. `points_per_unit` maps virtual screen pixels to
    /// egui points; `panel` is drawn only when present.
    pub fn run_frame(
        &mut self,
        window: &Window,
        screen_w: u32,
        screen_h: u32,
        scene: &FrameScene,
        points_per_unit: f32,
        panel: Option<&PanelSnapshot>,
    ) -> HudFrame {
        let raw_input = self.egui_state.take_egui_input(window);

        let ctx = self.egui_ctx.clone();
        let full_output = ctx.run(raw_input, |ctx| {
            paint_scene(ctx, scene, points_per_unit);
            if let Some(panel) = panel {
                debug::draw_panel(ctx, panel);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        HudFrame {
            primitives,
            textures_delta: full_output.textures_delta,
            screen_descriptor: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [screen_w, screen_h],
                pixels_per_point,
            },
        }
    }

    /// Upload egui textures and buffers. Call before the egui render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &HudFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            device,
            queue,
            encoder,
            &frame.primitives,
            &frame.screen_descriptor,
        )
    }

    /// Render egui into the given render pass.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'static>, frame: &HudFrame) {
        self.egui_renderer
            .render(render_pass, &frame.primitives, &frame.screen_descriptor);
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, frame: &HudFrame) {
        for id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Paint stat labels, then the indicator, behind any egui windows.
fn paint_scene(ctx: &egui::Context, scene: &FrameScene, points_per_unit: f32) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Background,
        egui::Id::new("bee_overlays"),
    ));
    let to_points = |v: glam::Vec2| egui::pos2(v.x * points_per_unit, v.y * points_per_unit);

    let font = egui::FontId::proportional(LABEL_FONT_SIZE * points_per_unit);
    for label in &scene.labels {
        painter.text(
            to_points(label.pos),
            egui::Align2::LEFT_TOP,
            &label.text,
            font.clone(),
            color32(label.color, label.alpha),
        );
    }

    let rect = scene.indicator.rect;
    painter.rect_filled(
        egui::Rect::from_min_max(to_points(rect.min), to_points(rect.min + rect.size)),
        0.0,
        color32(scene.indicator.color, 255),
    );
}

/// 0xRRGGBBAA with the packed alpha replaced by `alpha`.
fn color32(rgba: u32, alpha: u8) -> egui::Color32 {
    let [r, g, b, _] = rgba.to_be_bytes();
    egui::Color32::from_rgba_unmultiplied(r, g, b, alpha)
}
