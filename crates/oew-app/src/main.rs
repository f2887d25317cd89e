// ABOUTME: Main application entry point.
// ABOUTME: Opens the workstation window and routes pointer and window events to the pane layout.

mod workspace;

use std::sync::Arc;

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

use oew_core::{Axis, Config, PointerPosition};
use workspace::{Hover, Workspace};

struct App {
    window: Option<Arc<Window>>,
    config: Config,
    workspace: Workspace,
    hover: Hover,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let workspace = Workspace::from_config(&config)?;
        tracing::info!(
            "Workspace ready: {} {} panes, sizes {:?}",
            workspace.layout().len(),
            config.layout.axis.label(),
            workspace.layout().sizes()
        );

        Ok(Self {
            window: None,
            config,
            workspace,
            hover: Hover::Nothing,
        })
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor())
    }

    fn to_pointer(&self, position: PhysicalPosition<f64>) -> PointerPosition {
        let logical = position.to_logical::<f64>(self.scale_factor());
        PointerPosition::from((logical.x, logical.y))
    }

    fn extent_of(&self, size: PhysicalSize<u32>) -> f32 {
        let logical = size.to_logical::<f32>(self.scale_factor());
        match self.config.layout.axis {
            Axis::Horizontal => logical.width,
            Axis::Vertical => logical.height,
        }
    }

    fn set_hover(&mut self, hover: Hover) {
        if hover == self.hover {
            return;
        }
        self.hover = hover;
        let Some(window) = &self.window else {
            return;
        };
        let icon = match (hover, self.config.layout.axis) {
            (Hover::Nothing, _) => CursorIcon::Default,
            (_, Axis::Horizontal) => CursorIcon::ColResize,
            (_, Axis::Vertical) => CursorIcon::RowResize,
        };
        window.set_cursor(icon);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Orpheus Workstation")
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let physical_size = window.inner_size();
        tracing::info!(
            "Window created: {}x{} physical pixels, scale factor: {}",
            physical_size.width,
            physical_size.height,
            window.scale_factor()
        );
        self.window = Some(window);

        // The platform may not honour the requested size
        let extent = self.extent_of(physical_size);
        self.workspace.resized(extent);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let extent = self.extent_of(new_size);
                self.workspace.resized(extent);
            }
            WindowEvent::Focused(false) => {
                self.workspace.pointer_lost();
                self.set_hover(Hover::Nothing);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pointer = self.to_pointer(position);
                let hover = self.workspace.pointer_moved(pointer);
                self.set_hover(hover);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.workspace.pointer_pressed() {
                        self.set_hover(Hover::Dragging);
                    }
                }
                ElementState::Released => {
                    self.workspace.pointer_released();
                    let hover = self.workspace.hover();
                    self.set_hover(hover);
                }
            },
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => {
                        self.workspace.pointer_lost();
                        let hover = self.workspace.hover();
                        self.set_hover(hover);
                    }
                    Key::Character(s) if s.eq_ignore_ascii_case("m") => {
                        if let Some(height) = self.workspace.toggle_mixer() {
                            tracing::info!(
                                "Mixer at {}px, fader travel {:?}",
                                height,
                                self.workspace.fader_length()
                            );
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting orpheus-workstation");

    let config = Config::load_or_default();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
