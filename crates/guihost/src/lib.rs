//! guihost: a windowed egui host.
//!
//! Opens one window, draws a full-window dock host with an optional menu bar,
//! and shows a handful of demo windows on top of a configurable clear color.
//! Copy and paste go through the OS clipboard when one can be reached.
//!
//! # Quick Start
//!
//! ```no_run
//! fn main() -> guihost::Result<()> {
//!     guihost::run()
//! }
//! ```
//!
//! # Configuration
//!
//! [`Options`] are read from `guihost.json` next to the executable, or from
//! the file named by the `GUIHOST_CONFIG` environment variable. A missing file
//! means defaults. Logging follows `RUST_LOG` and defaults to `info`.

mod app;

pub use app::{run_app, App};

pub use guihost_core::{
    resolve_path, FixedTextBuffer, FrameClock, FrameTiming, GuiHostError, Options, Result,
    UiAction, UiState,
};
pub use guihost_ui::{
    compose_frame, ClipboardBridge, Dockspace, FrameReport, WidgetId, WindowKind,
};

/// Initializes logging, loads the options and runs the application until its
/// window closes.
pub fn run() -> Result<()> {
    init_logging();
    let options = Options::load_default_location()?;
    log::info!("starting {} ({}x{})", options.title, options.width, options.height);
    run_app(options)
}

/// Installs `env_logger` with `info` as the default filter.
///
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
