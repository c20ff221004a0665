//! Developer overlay drawn with egui on top of the presented canvas.
//!
//! egui needs its own render pass after the frame quad, split into phases
//! because `egui_wgpu::Renderer::render()` wants a `RenderPass<'static>`:
//!
//!   1. `prepare()` -- run the UI, tessellate
//!   2. `upload()`  -- push textures and buffers (borrows the encoder)
//!   3. `paint()`   -- draw into a pass created with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui dropped
//!
//! The window is only built while `visible` (F3).

use vgn_core::{PoolUsage, TimeState};
use winit::window::Window;

/// Per-frame numbers the scene runner hands to the overlay.
#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub demo: String,
    pub phase: String,
    pub elapsed_secs: f32,
    pub time_left_secs: f32,
    pub seed: u64,
    /// Live entities per collection, in draw order.
    pub entity_counts: Vec<(&'static str, usize)>,
    /// Capped pools and their overflow counters.
    pub pools: Vec<(&'static str, PoolUsage)>,
}

impl OverlayStats {
    pub fn total_entities(&self) -> usize {
        self.entity_counts.iter().map(|(_, n)| n).sum()
    }

    /// Text lines shown in the overlay window, one per row.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Demo: {}", self.demo),
            format!("Phase: {}", self.phase),
            format!("Elapsed: {:.2} s", self.elapsed_secs),
            format!("Time left: {:.2} s", self.time_left_secs),
            format!("Seed: {}", self.seed),
        ];
        for (name, count) in &self.entity_counts {
            lines.push(format!("{name}: {count}"));
        }
        lines.push(format!("Entities: {}", self.total_entities()));
        for (name, pool) in &self.pools {
            lines.push(format!(
                "{name} pool: {}/{} (evicted {}, rejected {})",
                pool.len, pool.capacity, pool.evicted, pool.rejected
            ));
        }
        lines
    }
}

pub struct DebugOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        log::info!("Debug overlay: {}", if self.visible { "ON" } else { "OFF" });
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        stats: &OverlayStats,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if self.visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 60.0])
                    .resizable(false)
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                        ui.label(format!("Steps this frame: {}", time.steps_this_frame));
                        ui.label(format!("Total steps: {}", time.fixed_step_count));
                        ui.separator();
                        for line in stats.lines() {
                            ui.label(line);
                        }
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> OverlayStats {
        OverlayStats {
            demo: "Forest Scene".to_string(),
            phase: "running".to_string(),
            elapsed_secs: 3.5,
            time_left_secs: 16.5,
            seed: 42,
            entity_counts: vec![("leaves", 20), ("flowers", 15)],
            pools: Vec::new(),
        }
    }

    #[test]
    fn totals_sum_collections() {
        assert_eq!(stats().total_entities(), 35);
        assert_eq!(OverlayStats::default().total_entities(), 0);
    }

    #[test]
    fn lines_list_every_collection() {
        let lines = stats().lines();
        assert_eq!(lines[0], "Demo: Forest Scene");
        assert!(lines.contains(&"leaves: 20".to_string()));
        assert!(lines.contains(&"flowers: 15".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Entities: 35"));
    }

    #[test]
    fn pool_counters_follow_the_entity_total() {
        let mut stats = stats();
        stats.pools = vec![(
            "bolts",
            PoolUsage {
                len: 12,
                capacity: 200,
                evicted: 0,
                rejected: 3,
            },
        )];
        let lines = stats.lines();
        let total = lines.iter().position(|l| l == "Entities: 35").unwrap();
        assert_eq!(lines[total + 1], "bolts pool: 12/200 (evicted 0, rejected 3)");
        assert_eq!(lines.len(), total + 2);
    }
}
