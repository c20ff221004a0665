//! winit shell: one window, one scene runner, the canvas presented each
//! frame with the debug overlay on top.

use std::process::ExitCode;
use std::sync::Arc;

use vgn_core::{InputState, Key};
use vgn_devtools::DebugOverlay;
use vgn_platform::{create_window, PlatformConfig};
use vgn_render::{GpuContext, PresentPipeline};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::demo::DemoKind;
use crate::runner::{FrameOutcome, SceneRunner};

struct DemoState {
    window: Arc<Window>,
    gpu: GpuContext,
    present: PresentPipeline,
    debug_overlay: DebugOverlay,
    runner: SceneRunner,
    input: InputState,
}

impl DemoState {
    fn new(event_loop: &ActiveEventLoop, mut runner: SceneRunner) -> Result<Self, String> {
        let config = runner.config();
        let platform = PlatformConfig::new(config.title.clone(), config.width, config.height);
        let window = create_window(event_loop, &platform)?;
        let gpu = GpuContext::new(window.clone())?;
        let present = PresentPipeline::new(
            &gpu.device,
            gpu.surface_format,
            platform.width,
            platform.height,
        );
        let debug_overlay = DebugOverlay::new(&gpu.device, gpu.surface_format, &window);
        runner.restart_clock();

        Ok(Self {
            window,
            gpu,
            present,
            debug_overlay,
            runner,
            input: InputState::new(),
        })
    }

    /// Runs one frame and puts it on screen. Returns false once the demo is
    /// over.
    fn redraw(&mut self) -> bool {
        let outcome = self.runner.frame_now(&self.input);
        if self.input.is_just_pressed(Key::F3) {
            self.debug_overlay.toggle();
        }
        self.input.end_frame();

        match outcome {
            FrameOutcome::Exit => return false,
            FrameOutcome::Redraw => self.present.upload(&self.gpu.queue, self.runner.canvas()),
            FrameOutcome::Hold => {}
        }

        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            return true;
        }
        let Some((output, view)) = self.gpu.begin_frame() else {
            return true;
        };

        let (egui_primitives, egui_textures_delta) = self.debug_overlay.prepare(
            &self.window,
            self.runner.time(),
            &self.runner.stats(),
        );
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            self.present.draw(&mut render_pass);
        }

        self.debug_overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.debug_overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.debug_overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        true
    }
}

pub struct App {
    pending: Option<SceneRunner>,
    state: Option<DemoState>,
    failure: Option<String>,
}

impl App {
    pub fn new(runner: SceneRunner) -> Self {
        Self {
            pending: Some(runner),
            state: None,
            failure: None,
        }
    }

    /// Set when the window or GPU could not be brought up.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let Some(runner) = self.pending.take() else {
            return;
        };
        match DemoState::new(event_loop, runner) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("{e}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state
            .debug_overlay
            .handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                state.input.request_close();
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                state.gpu.resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if !state.redraw() {
                    log::info!(
                        "'{}' finished after {:.1}s",
                        state.runner.config().title,
                        state.runner.clock().elapsed_secs()
                    );
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

/// Opens the demo's window and runs it to completion.
pub fn run(kind: DemoKind) -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let runner = match SceneRunner::new(kind) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("Failed to set up '{}': {e}", kind.slug());
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(runner);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
        return ExitCode::FAILURE;
    }
    match app.failure() {
        Some(_) => ExitCode::FAILURE,
        None => ExitCode::SUCCESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_escape_and_f3_are_mapped() {
        assert_eq!(map_key(KeyCode::Escape), Some(Key::Escape));
        assert_eq!(map_key(KeyCode::F3), Some(Key::F3));
        assert_eq!(map_key(KeyCode::Space), None);
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }
}
