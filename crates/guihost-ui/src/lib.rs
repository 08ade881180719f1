//! UI layer for guihost using egui.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod clipboard;
pub mod fonts;
pub mod integration;
pub mod layout;
pub mod theme;

pub use clipboard::{ClipboardBackend, ClipboardBridge, MemoryClipboard, NativeClipboard};
pub use integration::EguiIntegration;
pub use layout::{compose_frame, Dockspace, FrameReport, WidgetId, WindowKind};
