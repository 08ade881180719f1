//! Core types for guihost.
//!
//! This crate holds everything that does not touch the window system or GPU:
//! - [`Options`] loaded from an optional JSON file
//! - [`resolve_path`] for locating files next to the executable
//! - [`UiState`] mutated by the per-frame composition
//! - [`FixedTextBuffer`] backing the text-input widget
//! - [`FrameClock`] producing per-frame [`FrameTiming`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod options;
pub mod path;
pub mod state;
pub mod text_buffer;
pub mod timing;

pub use error::{GuiHostError, Result};
pub use options::Options;
pub use path::{executable_dir, resolve_path, resolve_path_from};
pub use state::{UiAction, UiState, TEXT_INPUT_CAPACITY};
pub use text_buffer::FixedTextBuffer;
pub use timing::{FrameClock, FrameTiming};
