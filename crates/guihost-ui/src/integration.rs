//! egui integration with wgpu and winit.

use egui::Context;
use egui_wgpu::Renderer as EguiRenderer;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State as EguiWinitState;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, KeyCode, ModifiersState, NamedKey, PhysicalKey};
use winit::window::Window;

use crate::clipboard::{ClipboardBackend, ClipboardBridge};

/// Manages egui state and rendering.
pub struct EguiIntegration {
    pub context: Context,
    pub state: EguiWinitState,
    pub renderer: EguiRenderer,
    clipboard: Option<Box<dyn ClipboardBackend>>,
    modifiers: ModifiersState,
    last_raw_input: egui::RawInput,
}

/// Upper bound on layout passes per frame.
const MAX_PASSES: u32 = 2;

impl EguiIntegration {
    /// Creates a new egui integration.
    ///
    /// `msaa_samples` must match the sample count of the color attachment
    /// later passed to [`Self::render`].
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        msaa_samples: u32,
        window: &Window,
    ) -> Self {
        let context = Context::default();
        context.set_visuals(egui::Visuals::dark());

        let viewport_id = context.viewport_id();
        let max_texture_side = device.limits().max_texture_dimension_2d as usize;
        let state = EguiWinitState::new(
            context.clone(),
            viewport_id,
            window,
            None,
            None,
            Some(max_texture_side),
        );

        let renderer = EguiRenderer::new(
            device,
            output_format,
            egui_wgpu::RendererOptions {
                msaa_samples,
                ..egui_wgpu::RendererOptions::default()
            },
        );

        Self {
            context,
            state,
            renderer,
            clipboard: None,
            modifiers: ModifiersState::empty(),
            last_raw_input: egui::RawInput::default(),
        }
    }

    /// Routes copy/paste through the negotiated backend.
    ///
    /// Returns the bridge's diagnostic when the native clipboard is unavailable.
    pub fn install_clipboard(&mut self, bridge: ClipboardBridge) -> Option<String> {
        let diagnostic = bridge.diagnostic();
        self.clipboard = bridge.into_backend();
        diagnostic
    }

    pub fn has_native_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Handles a winit window event.
    /// Returns true if egui consumed the event.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::KeyboardInput { event: key, .. } => {
                if is_paste_shortcut(self.modifiers, key) {
                    self.load_native_clipboard();
                }
            }
            _ => {}
        }

        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Copies the native clipboard into egui-winit's buffer so the paste
    /// egui-winit is about to emit carries the OS contents.
    fn load_native_clipboard(&mut self) {
        if let Some(clipboard) = &mut self.clipboard {
            self.state.set_clipboard_text(paste_text(clipboard.as_mut()));
        }
    }

    /// Begins a new frame by collecting input events and starting the egui pass.
    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.state.take_egui_input(window);
        self.last_raw_input = raw_input.clone();
        self.context.begin_pass(raw_input);
    }

    /// Begins a re-run pass with the last input minus its events.
    ///
    /// egui asks for one when a widget spent its first frame measuring itself.
    pub fn begin_rerun_pass(&mut self) {
        self.context.begin_pass(self.last_raw_input.take());
    }

    /// Runs `build_ui` for one frame, re-running it when egui discards a pass,
    /// and finishes with [`Self::end_frame`].
    pub fn run_frame(
        &mut self,
        window: &Window,
        mut build_ui: impl FnMut(&Context),
    ) -> egui::FullOutput {
        let mut output = egui::FullOutput::default();

        for pass in 0..MAX_PASSES {
            if pass == 0 {
                self.begin_frame(window);
            } else {
                self.begin_rerun_pass();
            }
            build_ui(&self.context);
            output.append(self.context.end_pass());

            if !output.platform_output.requested_discard() {
                break;
            }
            output.platform_output.request_discard_reasons.clear();
        }

        self.end_frame(window, output)
    }

    /// Routes clipboard output and hands the rest of the platform output to
    /// egui-winit. Returns the paint data.
    pub fn end_frame(&mut self, window: &Window, mut output: egui::FullOutput) -> egui::FullOutput {
        let mut platform_output = std::mem::take(&mut output.platform_output);

        if let Some(clipboard) = &mut self.clipboard {
            route_copy_commands(clipboard.as_mut(), &mut platform_output);
        }

        self.state.handle_platform_output(window, platform_output);
        output
    }

    /// Renders egui into `color_attachment`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        color_attachment: wgpu::RenderPassColorAttachment<'_>,
        screen_descriptor: &ScreenDescriptor,
        output: egui::FullOutput,
    ) -> Vec<wgpu::CommandBuffer> {
        let paint_jobs = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);

        for (id, image_delta) in &output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let callback_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &paint_jobs, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(color_attachment)],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            // Convert to 'static lifetime as required by egui-wgpu's render method
            let mut render_pass = render_pass.forget_lifetime();

            self.renderer
                .render(&mut render_pass, &paint_jobs, screen_descriptor);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        callback_buffers
    }
}

/// Sends egui's copy requests to `clipboard`, leaving other commands in place.
pub fn route_copy_commands(clipboard: &mut dyn ClipboardBackend, output: &mut egui::PlatformOutput) {
    output.commands.retain(|command| match command {
        egui::OutputCommand::CopyText(text) => {
            clipboard.set_text(text);
            false
        }
        _ => true,
    });
}

/// Text a paste should insert. Empty when the clipboard holds no text, so an
/// earlier paste is not repeated; egui-winit drops empty pastes.
pub fn paste_text(clipboard: &mut dyn ClipboardBackend) -> String {
    clipboard.get_text().unwrap_or_default()
}

/// Ctrl+V (Cmd+V on macOS) or Shift+Insert.
pub fn is_paste_shortcut(modifiers: ModifiersState, event: &KeyEvent) -> bool {
    if event.state != ElementState::Pressed {
        return false;
    }

    let command = if cfg!(target_os = "macos") {
        modifiers.super_key()
    } else {
        modifiers.control_key()
    };
    let is_v = matches!(event.physical_key, PhysicalKey::Code(KeyCode::KeyV))
        || matches!(&event.logical_key, Key::Character(c) if c.eq_ignore_ascii_case("v"));
    let is_insert = matches!(event.logical_key, Key::Named(NamedKey::Insert));

    (command && is_v) || (modifiers.shift_key() && is_insert)
}
