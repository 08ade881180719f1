//! Configuration options for guihost.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GuiHostError, Result};

/// File name of the options file looked up next to the executable.
pub const OPTIONS_FILE_NAME: &str = "guihost.json";

/// Environment variable overriding the options file location.
pub const OPTIONS_ENV_VAR: &str = "GUIHOST_CONFIG";

/// Default clear color, also the initial color-picker value.
pub const DEFAULT_CLEAR_COLOR: [f32; 3] = [114.0 / 255.0, 144.0 / 255.0, 154.0 / 255.0];

/// Startup options for the sample application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Window title.
    pub title: String,

    /// Initial client width in logical pixels.
    pub width: u32,

    /// Initial client height in logical pixels.
    pub height: u32,

    /// Multisample count for the back buffer (1 = off).
    pub msaa_samples: u32,

    /// Whether the user can resize the window.
    pub resizable: bool,

    /// Whether the dockspace host carries a menu bar.
    pub show_menu_bar: bool,

    /// Initial clear color (sRGB, 0..1).
    pub clear_color: [f32; 3],

    /// Extra font files, resolved against the executable directory.
    pub fonts: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            title: "guihost".to_string(),
            width: 1024,
            height: 768,
            msaa_samples: 4,
            resizable: true,
            show_menu_bar: true,
            clear_color: DEFAULT_CLEAR_COLOR,
            fonts: Vec::new(),
        }
    }
}

impl Options {
    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Loads options from `path`.
    ///
    /// A missing file yields [`Options::default`]; any other read failure or
    /// malformed content is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no options file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(GuiHostError::OptionsRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let options = Self::from_json(&text).map_err(|source| GuiHostError::OptionsParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded options from {}", path.display());
        Ok(options.sanitized())
    }

    /// Loads options from `$GUIHOST_CONFIG`, or `guihost.json` next to the executable.
    pub fn load_default_location() -> Result<Self> {
        let path = match std::env::var_os(OPTIONS_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => crate::path::resolve_path([OPTIONS_FILE_NAME])?,
        };
        Self::load(&path)
    }

    /// Clamps values the window system or GPU cannot accept.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.width = self.width.max(1);
        self.height = self.height.max(1);
        // wgpu only accepts power-of-two sample counts.
        self.msaa_samples = match self.msaa_samples {
            0 | 1 => 1,
            n if n.is_power_of_two() => n,
            n => n.checked_next_power_of_two().map_or(1 << 31, |p| p / 2),
        };
        for channel in &mut self.clear_color {
            *channel = channel.clamp(0.0, 1.0);
        }
        self
    }

    /// Resolved paths of the configured font files.
    pub fn font_paths(&self) -> Result<Vec<PathBuf>> {
        let base = crate::path::executable_dir()?;
        Ok(self
            .fonts
            .iter()
            .map(|font| crate::path::resolve_path_from(&base, [font]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_sample() {
        let options = Options::default();
        assert_eq!(options.width, 1024);
        assert_eq!(options.height, 768);
        assert_eq!(options.msaa_samples, 4);
        assert!(options.resizable);
        assert!(options.show_menu_bar);
        assert!(options.fonts.is_empty());
        assert!((options.clear_color[0] - 114.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = Options::from_json(r#"{ "width": 640, "fonts": ["fonts/cjk.ttf"] }"#).unwrap();
        assert_eq!(options.width, 640);
        assert_eq!(options.height, 768);
        assert_eq!(options.fonts, vec!["fonts/cjk.ttf".to_string()]);
        assert_eq!(options.title, "guihost");
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Options::from_json(r#"{ "width": "wide" }"#).is_err());
        assert!(Options::from_json("not json").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("guihost-definitely-missing-options.json");
        let options = Options::load(&path).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_load_reports_parse_error_with_path() {
        let path = std::env::temp_dir().join(format!("guihost-bad-options-{}.json", std::process::id()));
        std::fs::write(&path, "{ broken").unwrap();
        let err = Options::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, GuiHostError::OptionsParse { .. }));
        assert!(err.to_string().contains("guihost-bad-options"));
    }

    #[test]
    fn test_sanitized_msaa() {
        let fix = |n| Options { msaa_samples: n, ..Options::default() }.sanitized().msaa_samples;
        assert_eq!(fix(0), 1);
        assert_eq!(fix(1), 1);
        assert_eq!(fix(4), 4);
        assert_eq!(fix(6), 4);
        assert_eq!(fix(8), 8);
        assert_eq!(fix(u32::MAX), 1 << 31);
        assert_eq!(fix((1 << 31) + 1), 1 << 31);
    }

    #[test]
    fn test_load_huge_msaa_from_file() {
        let path = std::env::temp_dir().join(format!("guihost-huge-msaa-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "msaa_samples": 4294967295 }"#).unwrap();
        let options = Options::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(options.unwrap().msaa_samples, 1 << 31);
    }

    #[test]
    fn test_sanitized_clamps_color_and_size() {
        let options = Options {
            width: 0,
            clear_color: [1.5, -0.2, 0.5],
            ..Options::default()
        }
        .sanitized();
        assert_eq!(options.width, 1);
        assert_eq!(options.clear_color, [1.0, 0.0, 0.5]);
    }
}
