//! Transient UI state owned by the application.

use crate::options::{Options, DEFAULT_CLEAR_COLOR};
use crate::text_buffer::FixedTextBuffer;

/// Capacity in bytes of the text-input widget's buffer.
pub const TEXT_INPUT_CAPACITY: usize = 100;

/// State the per-frame composition reads and mutates.
///
/// Owned by the application object and handed to the composition routine by
/// mutable reference every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Value bound to the demo slider, in [0, 1].
    pub slider_value: f32,
    /// Whether the library demo window is shown.
    pub show_demo_window: bool,
    /// Whether the secondary window is shown.
    pub show_another_window: bool,
    /// Screen clear color, also edited by the color picker.
    pub clear_color: [f32; 3],
    /// Backing store of the text-input widget.
    pub text: FixedTextBuffer<TEXT_INPUT_CAPACITY>,
    /// Whether the dockspace host draws a menu bar.
    pub show_menu_bar: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            slider_value: 0.0,
            show_demo_window: false,
            show_another_window: false,
            clear_color: DEFAULT_CLEAR_COLOR,
            text: FixedTextBuffer::new(),
            show_menu_bar: true,
        }
    }
}

impl UiState {
    /// Initial state for the given options.
    pub fn from_options(options: &Options) -> Self {
        Self {
            clear_color: options.clear_color,
            show_menu_bar: options.show_menu_bar,
            ..Self::default()
        }
    }

    /// Applies an action produced by the composition routine.
    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleDemoWindow => self.show_demo_window = !self.show_demo_window,
            UiAction::ToggleAnotherWindow => {
                self.show_another_window = !self.show_another_window;
            }
        }
        log::debug!("applied {action:?}");
    }
}

/// State changes requested by widgets during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    /// "Test Window" button: flip the library demo window.
    ToggleDemoWindow,
    /// "Another Window" button: flip the secondary window.
    ToggleAnotherWindow,
}
