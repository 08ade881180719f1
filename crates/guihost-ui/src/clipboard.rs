//! Native clipboard negotiation.
//!
//! egui-winit is built without its own clipboard support, so copy/paste stays
//! inside the process unless a native backend is installed here.

use std::fmt;

/// Name of the platform facility the native clipboard depends on.
#[cfg(target_os = "macos")]
pub const PLATFORM_DEPENDENCY: &str = "AppKit";
#[cfg(windows)]
pub const PLATFORM_DEPENDENCY: &str = "user32";
#[cfg(not(any(target_os = "macos", windows)))]
pub const PLATFORM_DEPENDENCY: &str = "X11 or Wayland display server";

/// Get/set access to a clipboard.
pub trait ClipboardBackend {
    /// Current clipboard text, if there is any.
    fn get_text(&mut self) -> Option<String>;

    /// Replaces the clipboard contents with `text`.
    fn set_text(&mut self, text: &str);
}

/// The OS clipboard via `arboard`.
pub struct NativeClipboard {
    inner: arboard::Clipboard,
}

impl NativeClipboard {
    /// Connects to the OS clipboard.
    pub fn open() -> Result<Self, arboard::Error> {
        arboard::Clipboard::new().map(|inner| Self { inner })
    }
}

impl ClipboardBackend for NativeClipboard {
    fn get_text(&mut self) -> Option<String> {
        match self.inner.get_text() {
            Ok(text) => Some(text),
            Err(arboard::Error::ContentNotAvailable) => None,
            Err(e) => {
                log::error!("clipboard paste error: {e}");
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        if let Err(e) = self.inner.set_text(text) {
            log::error!("clipboard copy error: {e}");
        }
    }
}

/// Outcome of clipboard capability negotiation.
pub enum ClipboardBridge {
    /// No native clipboard; the GUI keeps its in-process buffer.
    Unavailable {
        /// The platform facility that could not be reached.
        dependency: &'static str,
        /// Why the connection attempt failed.
        reason: String,
    },
    /// Copy/paste is routed through this backend.
    Installed(Box<dyn ClipboardBackend>),
}

impl ClipboardBridge {
    /// Probes the OS clipboard for the current platform.
    pub fn negotiate() -> Self {
        Self::negotiate_with(PLATFORM_DEPENDENCY, NativeClipboard::open)
    }

    /// Runs `connect` and wraps its outcome.
    ///
    /// A failed attempt is logged as a warning naming `dependency` and never
    /// surfaces as an error.
    pub fn negotiate_with<B, E, F>(dependency: &'static str, connect: F) -> Self
    where
        B: ClipboardBackend + 'static,
        E: fmt::Display,
        F: FnOnce() -> Result<B, E>,
    {
        match connect() {
            Ok(backend) => {
                log::info!("native clipboard enabled via {dependency}");
                Self::Installed(Box::new(backend))
            }
            Err(e) => {
                let bridge = Self::Unavailable {
                    dependency,
                    reason: e.to_string(),
                };
                if let Some(message) = bridge.diagnostic() {
                    log::warn!("{message} ({e})");
                }
                bridge
            }
        }
    }

    /// Human-readable explanation when the native clipboard is disabled.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Unavailable { dependency, .. } => Some(format!(
                "Clipboard support is disabled. Could not load necessary dependency: '{dependency}'."
            )),
            Self::Installed(_) => None,
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed(_))
    }

    /// The installed backend, if any.
    pub fn into_backend(self) -> Option<Box<dyn ClipboardBackend>> {
        match self {
            Self::Installed(backend) => Some(backend),
            Self::Unavailable { .. } => None,
        }
    }
}

impl fmt::Debug for ClipboardBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { dependency, reason } => f
                .debug_struct("Unavailable")
                .field("dependency", dependency)
                .field("reason", reason)
                .finish(),
            Self::Installed(_) => f.write_str("Installed(..)"),
        }
    }
}

/// In-memory clipboard, used where no OS clipboard is wanted.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl ClipboardBackend for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_owned());
    }
}
