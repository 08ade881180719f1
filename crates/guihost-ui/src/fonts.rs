//! Font atlas setup.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use egui::{FontData, FontDefinitions, FontFamily};
use guihost_core::{GuiHostError, Result};

/// Adds each font file as a fallback to egui's built-in families.
///
/// The built-in fonts keep priority, so a CJK font only supplies glyphs the
/// defaults lack (the menu labels, for one).
pub fn font_definitions(paths: &[PathBuf]) -> Result<FontDefinitions> {
    let mut fonts = FontDefinitions::default();

    for path in paths {
        let bytes = std::fs::read(path).map_err(|source| GuiHostError::FontLoad {
            path: path.clone(),
            source,
        })?;
        let name = path.file_stem().map_or_else(
            || path.display().to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        );

        fonts
            .font_data
            .insert(name.clone(), Arc::new(FontData::from_owned(bytes)));
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push(name.clone());
        }
        log::info!("loaded font '{name}' from {}", path.display());
    }

    Ok(fonts)
}

static HINTED: AtomicBool = AtomicBool::new(false);

/// Han, kana and full-width forms. egui's built-in fonts have none of them.
fn needs_cjk_font(c: char) -> bool {
    matches!(
        c,
        '\u{3000}'..='\u{30ff}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{f900}'..='\u{faff}'
            | '\u{ff00}'..='\u{ffef}'
    )
}

/// Hint for when `labels` need glyphs the built-in fonts lack and no font
/// file was configured to supply them.
pub fn missing_glyph_hint(paths: &[PathBuf], labels: &[&str]) -> Option<String> {
    if !paths.is_empty() {
        return None;
    }
    let missing: Vec<&str> = labels
        .iter()
        .copied()
        .filter(|label| label.chars().any(needs_cjk_font))
        .collect();
    if missing.is_empty() {
        return None;
    }
    Some(format!(
        "no font configured for {missing:?}; they will render as boxes. \
         Set \"fonts\" in guihost.json to a CJK font file"
    ))
}

/// Rebuilds the font atlas of `ctx` with `paths` added.
///
/// Logs once per process when the menu labels need a font nobody configured.
pub fn install(ctx: &egui::Context, paths: &[PathBuf]) -> Result<()> {
    let mut labels = vec![crate::layout::MENU_TITLE];
    labels.extend(crate::layout::MENU_ITEMS);
    if let Some(hint) = missing_glyph_hint(paths, &labels) {
        if !HINTED.swap(true, Ordering::Relaxed) {
            log::warn!("{hint}");
        }
    }

    if paths.is_empty() {
        return Ok(());
    }
    ctx.set_fonts(font_definitions(paths)?);
    Ok(())
}
