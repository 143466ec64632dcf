//! Interactive viewer: a winit window that steps and draws one rope.
//!
//! Controls: drag with the left mouse button to orbit, scroll to zoom,
//! `Space` to pause, `R` to reset the rope, `Escape` to quit.

use std::sync::Arc;

use tracing::{error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::RopeConfig;
use crate::error::ViewerError;
use crate::gpu::RopeRenderer;
use crate::rope::RopeSimulator;
use crate::time::Clock;

/// A rope viewer builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```no_run
/// use ropesim::{RopeConfig, Viewer};
///
/// Viewer::new(RopeConfig::default().with_node_count(30))
///     .with_time_scale(0.5)
///     .run()
///     .unwrap();
/// ```
pub struct Viewer {
    config: RopeConfig,
    title: String,
    fixed_delta: Option<f32>,
    time_scale: f32,
}

impl Viewer {
    /// Create a viewer for a rope built from `config`.
    pub fn new(config: RopeConfig) -> Self {
        Self {
            config,
            title: "ropesim".to_string(),
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Step by a fixed `dt` every frame instead of measured frame time.
    pub fn with_fixed_delta(mut self, dt: Option<f32>) -> Self {
        self.fixed_delta = dt;
        self
    }

    /// Scale simulated time relative to wall time.
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    /// Open the window and run until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the rope configuration is invalid or the window or
    /// GPU cannot be set up.
    pub fn run(self) -> Result<(), ViewerError> {
        let rope = RopeSimulator::new(self.config)?;

        let mut clock = Clock::new();
        clock.set_fixed_delta(self.fixed_delta);
        clock.set_time_scale(self.time_scale);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            title: self.title,
            rope,
            clock,
            window: None,
            renderer: None,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    title: String,
    rope: RopeSimulator,
    clock: Clock,
    window: Option<Arc<Window>>,
    renderer: Option<RopeRenderer>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    /// Startup failure, reported by `Viewer::run` after the loop exits.
    error: Option<ViewerError>,
}

impl App {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let mut renderer = pollster::block_on(RopeRenderer::new(window.clone(), self.rope.len()))?;
        renderer.camera.frame(&self.rope.positions());

        info!(nodes = self.rope.len(), "viewer started");
        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock.reset();
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            PhysicalKey::Code(KeyCode::Space) => {
                self.clock.toggle_pause();
                info!(paused = self.clock.is_paused(), "toggled pause");
            }
            PhysicalKey::Code(KeyCode::KeyR) => {
                self.rope.reset();
                self.clock.reset();
                info!("rope reset");
            }
            _ => {}
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        self.rope.step(dt);

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        self.rope.render_to(renderer);

        match renderer.render() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => error!(error = %e, "render error"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                error!(error = %e, "failed to start viewer");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        if let Some(renderer) = &mut self.renderer {
                            renderer.camera.orbit(dx, dy);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(renderer) = &mut self.renderer {
                    renderer.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
