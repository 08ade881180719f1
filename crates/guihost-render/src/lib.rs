//! Rendering backend for guihost.
//!
//! This crate owns the wgpu side of the sample:
//! - adapter, device and window surface bootstrap
//! - the optional multisampled color target
//! - per-frame swapchain acquisition and the clear color

pub mod engine;
pub mod error;

pub use engine::{clear_color_for, FrameTarget, RenderEngine};
pub use error::{RenderError, RenderResult};
