//! Error types for guihost.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for guihost operations.
#[derive(Error, Debug)]
pub enum GuiHostError {
    /// The executable's own location could not be determined.
    #[error("could not locate the running executable: {0}")]
    ExecutableDir(#[source] std::io::Error),

    /// An options file could not be read.
    #[error("failed to read options file '{}': {source}", path.display())]
    OptionsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An options file was not valid JSON for [`crate::Options`].
    #[error("invalid options file '{}': {source}", path.display())]
    OptionsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configured font file could not be loaded.
    #[error("failed to load font '{}': {source}", path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Window creation failed.
    #[error("window error: {0}")]
    Window(String),

    /// Rendering error.
    #[error("render error: {0}")]
    Render(String),

    /// The event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(String),
}

/// A specialized Result type for guihost operations.
pub type Result<T> = std::result::Result<T, GuiHostError>;
