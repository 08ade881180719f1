use super::{
    ActiveEventLoop, App, ApplicationHandler, Arc, ClipboardBridge, EguiIntegration, FutureExt,
    GuiHostError, LogicalSize, RenderEngine, Window, WindowEvent, WindowId,
};

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(gui), Some(window)) = (&mut self.gui, &self.window) {
            gui.handle_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let timing = self.clock.tick(std::time::Instant::now());
                if let Err(e) = self.render(timing) {
                    self.fail(event_loop, e);
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

impl App {
    /// Creates the window and everything drawn into it.
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> guihost_core::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(self.options.width, self.options.height))
            .with_resizable(self.options.resizable);

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| GuiHostError::Window(e.to_string()))?,
        );

        let engine = RenderEngine::new_windowed(window.clone(), self.options.msaa_samples)
            .block_on()
            .map_err(|e| GuiHostError::Render(e.to_string()))?;

        let mut gui =
            EguiIntegration::new(&engine.device, engine.format(), engine.msaa_samples(), &window);
        guihost_ui::fonts::install(&gui.context, &self.options.font_paths()?)?;
        guihost_ui::theme::install(&gui.context);
        gui.install_clipboard(ClipboardBridge::negotiate());

        log::info!(
            "window ready: {}x{} px, {:?}, {}x MSAA",
            engine.width,
            engine.height,
            engine.format(),
            engine.msaa_samples()
        );

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.gui = Some(gui);
        Ok(())
    }
}
