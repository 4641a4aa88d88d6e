//! Application shell
//!
//! Thin winit layer around the engine: window creation, the display
//! refresh loop, and the two key bindings (Escape quits, T toggles which
//! grid texture is displayed). Every other input event is logged at debug
//! level and ignored.
//!
//! Each `RedrawRequested` runs exactly one compute+present pair; the next
//! redraw is requested from `about_to_wait`, so with a Fifo surface the
//! loop paces itself to the display refresh. Any frame error tears the
//! loop down; in-flight GPU work drains on its own.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use log::{debug, error};

use crate::error::Result;
use crate::gfx::RenderEngine;
use crate::sim::FrameDriver;

pub struct PetriApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    driver: FrameDriver,
}

impl PetriApp {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop,
            app_state: AppState {
                window: None,
                render_engine: None,
                driver: FrameDriver::new(),
            },
        })
    }

    /// Runs the application (consumes self and starts the event loop)
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("petri")
                .with_inner_size(winit::dpi::LogicalSize::new(1024, 1024)),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let engine = pollster::block_on(RenderEngine::new(window, width, height));

        match engine {
            Ok(engine) => self.render_engine = Some(engine),
            Err(err) => {
                error!("engine startup failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        state: winit::event::ElementState::Pressed,
                        ..
                    },
                ..
            } => match key_code {
                winit::keyboard::KeyCode::Escape => {
                    event_loop.exit();
                }
                winit::keyboard::KeyCode::KeyT => {
                    self.driver.toggle_display();
                    debug!("display buffer: {:?}", self.driver.display());
                }
                other => {
                    debug!("ignoring key {other:?}");
                }
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = render_engine.run_frame(&mut self.driver) {
                    // No partial present and no retry: a mid-frame failure
                    // means the surface or device is gone.
                    error!("frame {} abandoned: {err}", self.driver.frame());
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
