//! Application window and event loop management.

mod input;
mod render;

pub(super) use std::sync::Arc;

pub(super) use egui_wgpu::ScreenDescriptor;
pub(super) use pollster::FutureExt;
pub(super) use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

pub(super) use guihost_core::{FrameClock, FrameTiming, GuiHostError, Options, UiState};
pub(super) use guihost_render::RenderEngine;
pub(super) use guihost_ui::{ClipboardBridge, Dockspace, EguiIntegration};

/// The guihost application state.
///
/// Owns the window, the GPU objects, the GUI context and the [`UiState`]
/// and dock layout the composition works on. Everything is created lazily in `resumed`.
pub struct App {
    pub(super) options: Options,
    pub(super) window: Option<Arc<Window>>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) gui: Option<EguiIntegration>,
    pub(super) ui_state: UiState,
    pub(super) dock: Dockspace,
    pub(super) clock: FrameClock,
    // First fatal error; stops the loop and is handed back by `run_app`
    pub(super) error: Option<GuiHostError>,
}

impl App {
    /// Creates a new application.
    pub fn new(options: Options) -> Self {
        let ui_state = UiState::from_options(&options);
        Self {
            options,
            window: None,
            engine: None,
            gui: None,
            ui_state,
            dock: Dockspace::new(),
            clock: FrameClock::new(),
            error: None,
        }
    }

    /// Records `error` and stops the event loop.
    pub(super) fn fail(&mut self, event_loop: &ActiveEventLoop, error: GuiHostError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }
}

/// Runs the application until its window closes.
pub fn run_app(options: Options) -> guihost_core::Result<()> {
    let event_loop = EventLoop::new().map_err(|e| GuiHostError::EventLoop(e.to_string()))?;
    let mut app = App::new(options);

    event_loop
        .run_app(&mut app)
        .map_err(|e| GuiHostError::EventLoop(e.to_string()))?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
