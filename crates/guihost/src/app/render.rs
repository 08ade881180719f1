use super::{App, FrameTiming, GuiHostError, ScreenDescriptor};

impl App {
    /// Composes and presents one frame.
    ///
    /// Skipped frames (lost, outdated or timed-out surface) are not errors;
    /// only an out-of-memory surface is.
    pub(super) fn render(&mut self, timing: FrameTiming) -> guihost_core::Result<()> {
        let (Some(engine), Some(gui), Some(window)) =
            (&mut self.engine, &mut self.gui, &self.window)
        else {
            return Ok(());
        };

        // Acquire first: a skipped frame must not drop egui's texture uploads
        let Some(frame) = engine
            .acquire_frame()
            .map_err(|e| GuiHostError::Render(e.to_string()))?
        else {
            return Ok(());
        };

        let ui_state = &mut self.ui_state;
        let dock = &mut self.dock;
        let output = gui.run_frame(window, |ctx| {
            guihost_ui::compose_frame(ctx, ui_state, dock, &timing);
        });

        let mut encoder = engine
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        #[allow(clippy::cast_possible_truncation)]
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [engine.width, engine.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        let mut command_buffers = gui.render(
            &engine.device,
            &engine.queue,
            &mut encoder,
            engine.color_attachment(&frame, self.ui_state.clear_color),
            &screen_descriptor,
            output,
        );
        command_buffers.push(encoder.finish());

        engine.queue.submit(command_buffers);
        frame.present();
        Ok(())
    }
}
