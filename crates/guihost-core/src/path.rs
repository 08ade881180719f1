//! Resolution of resource paths relative to the executable.
//!
//! Assets and the options file ship next to the binary, so relative paths are
//! anchored at the executable's directory rather than the working directory.

use std::path::{Component, Path, PathBuf};

use crate::error::{GuiHostError, Result};

/// Joins `segments` and resolves the result against the directory containing
/// the running executable.
///
/// An absolute joined path is returned unchanged. A relative one is appended
/// to the executable directory and normalized lexically (`.` and `..` are
/// folded without touching the filesystem). Zero segments yield the
/// executable directory itself.
///
/// # Errors
///
/// Returns [`GuiHostError::ExecutableDir`] if the executable path cannot be
/// queried from the OS.
pub fn resolve_path<I, S>(segments: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let base = executable_dir()?;
    Ok(resolve_path_from(&base, segments))
}

/// Same as [`resolve_path`] with an explicit base directory.
pub fn resolve_path_from<I, S>(base: &Path, segments: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = PathBuf::new();
    for segment in segments {
        joined.push(segment);
    }

    if joined.is_absolute() {
        return joined;
    }

    normalize(&base.join(joined))
}

/// The directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(GuiHostError::ExecutableDir)?;
    Ok(exe
        .parent()
        .map_or_else(|| PathBuf::from(Component::RootDir.as_os_str()), Path::to_path_buf))
}

/// Lexically folds `.` and `..` components. `..` never climbs above the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Only pop real directory names; the root/prefix stays put.
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\apps\guihost")
        } else {
            PathBuf::from("/opt/guihost/bin")
        }
    }

    #[test]
    fn test_zero_segments_is_base() {
        let segments: [&str; 0] = [];
        assert_eq!(resolve_path_from(&base(), segments), base());
    }

    #[test]
    fn test_relative_segments_join_base() {
        let resolved = resolve_path_from(&base(), ["fonts", "DroidSans.ttf"]);
        assert_eq!(resolved, base().join("fonts").join("DroidSans.ttf"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_dot_segments_are_folded() {
        let resolved = resolve_path_from(&base(), ["./assets", "../fonts", "a.ttf"]);
        assert_eq!(resolved, base().join("fonts").join("a.ttf"));

        let up = resolve_path_from(&base(), [".."]);
        assert_eq!(up, base().parent().unwrap().to_path_buf());
    }

    #[test]
    fn test_parent_does_not_escape_root() {
        let root = base().ancestors().last().unwrap().to_path_buf();
        let many_ups = resolve_path_from(&base(), ["../../../../../../.."]);
        assert_eq!(many_ups, root);
    }

    #[test]
    fn test_absolute_is_unchanged() {
        let abs = base().join("..").join("elsewhere").join("x.json");
        assert_eq!(resolve_path_from(Path::new("ignored"), [&abs]), abs);
    }

    #[test]
    fn test_resolve_against_executable() {
        let dir = executable_dir().unwrap();
        assert!(dir.is_absolute());
        assert_eq!(resolve_path(["guihost.json"]).unwrap(), dir.join("guihost.json"));
    }

    proptest! {
        #[test]
        fn prop_relative_names_append_to_base(names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 0..6)) {
            let resolved = resolve_path_from(&base(), &names);
            let mut expected = base();
            for name in &names {
                expected.push(name);
            }
            prop_assert!(resolved.is_absolute());
            prop_assert_eq!(resolved, expected);
        }

        #[test]
        fn prop_absolute_input_returned_verbatim(names in prop::collection::vec("[a-z.]{1,6}", 1..5)) {
            let mut abs = base();
            for name in &names {
                abs.push(name);
            }
            prop_assert_eq!(resolve_path_from(Path::new("unused"), [&abs]), abs);
        }

        #[test]
        fn prop_result_has_no_dot_components(names in prop::collection::vec(prop_oneof!["[a-z]{1,4}", Just(".".to_string()), Just("..".to_string())], 0..8)) {
            let resolved = resolve_path_from(&base(), &names);
            prop_assert!(resolved
                .components()
                .all(|c| !matches!(c, Component::CurDir | Component::ParentDir)));
        }
    }
}
