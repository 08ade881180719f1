//! The hand-authored theme.
//!
//! Colors are sRGB with straight alpha, written as 0..1 floats.

use egui::{Color32, CornerRadius, Margin, Stroke, Style};

/// Theme color slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    Text,
    TextDisabled,
    WindowBg,
    Border,
    BorderShadow,
    FrameBg,
    FrameBgHovered,
    FrameBgActive,
    MenuBarBg,
    Button,
    ButtonHovered,
    ButtonActive,
    Separator,
    TextSelectedBg,
    DockingEmptyBg,
    TableRowBgAlt,
}

/// Color table.
pub const PALETTE: &[(ThemeColor, [f32; 4])] = &[
    (ThemeColor::Text, [1.00, 1.00, 1.00, 1.00]),
    (ThemeColor::TextDisabled, [0.50, 0.50, 0.50, 1.00]),
    (ThemeColor::WindowBg, [0.10, 0.10, 0.10, 1.00]),
    (ThemeColor::Border, [0.19, 0.19, 0.19, 0.29]),
    (ThemeColor::BorderShadow, [0.00, 0.00, 0.00, 0.24]),
    (ThemeColor::FrameBg, [0.05, 0.05, 0.05, 0.54]),
    (ThemeColor::FrameBgHovered, [0.19, 0.19, 0.19, 0.54]),
    (ThemeColor::FrameBgActive, [0.20, 0.22, 0.23, 1.00]),
    (ThemeColor::MenuBarBg, [0.14, 0.14, 0.14, 1.00]),
    (ThemeColor::Button, [0.50, 0.50, 0.50, 0.50]),
    (ThemeColor::ButtonHovered, [0.19, 0.19, 0.19, 0.54]),
    (ThemeColor::ButtonActive, [0.20, 0.22, 0.23, 1.00]),
    (ThemeColor::Separator, [0.28, 0.28, 0.28, 0.29]),
    (ThemeColor::TextSelectedBg, [0.20, 0.22, 0.23, 1.00]),
    (ThemeColor::DockingEmptyBg, [0.00, 0.00, 0.00, 1.00]),
    (ThemeColor::TableRowBgAlt, [1.00, 1.00, 1.00, 0.06]),
];

/// Spacing, border and rounding constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeMetrics {
    pub window_padding: f32,
    pub frame_padding: [f32; 2],
    pub item_spacing: [f32; 2],
    pub item_inner_spacing: f32,
    pub touch_extra_padding: f32,
    pub indent_spacing: f32,
    pub scrollbar_size: f32,
    pub grab_min_size: f32,
    pub window_border_size: f32,
    pub frame_border_size: f32,
    pub window_rounding: u8,
    pub popup_rounding: u8,
    pub frame_rounding: u8,
}

pub const METRICS: ThemeMetrics = ThemeMetrics {
    window_padding: 8.0,
    frame_padding: [5.0, 2.0],
    item_spacing: [6.0, 6.0],
    item_inner_spacing: 6.0,
    touch_extra_padding: 0.0,
    indent_spacing: 25.0,
    scrollbar_size: 15.0,
    grab_min_size: 10.0,
    window_border_size: 1.0,
    frame_border_size: 1.0,
    window_rounding: 7,
    popup_rounding: 4,
    frame_rounding: 3,
};

/// Looks up a slot in [`PALETTE`].
pub fn color(slot: ThemeColor) -> Color32 {
    PALETTE
        .iter()
        .find(|(s, _)| *s == slot)
        .map_or(Color32::MAGENTA, |(_, rgba)| to_color32(*rgba))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_color32([r, g, b, a]: [f32; 4]) -> Color32 {
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(byte(r), byte(g), byte(b), byte(a))
}

/// Writes the theme into `style`.
pub fn apply_theme(style: &mut Style) {
    let m = METRICS;

    let spacing = &mut style.spacing;
    #[allow(clippy::cast_possible_truncation)]
    let window_margin = m.window_padding as i8;
    spacing.window_margin = Margin::same(window_margin);
    spacing.button_padding = m.frame_padding.into();
    spacing.item_spacing = m.item_spacing.into();
    spacing.icon_spacing = m.item_inner_spacing;
    spacing.indent = m.indent_spacing;
    spacing.scroll.bar_width = m.scrollbar_size;
    spacing.scroll.handle_min_length = m.grab_min_size;
    style.interaction.interact_radius = m.touch_extra_padding;

    let visuals = &mut style.visuals;
    visuals.dark_mode = true;
    visuals.override_text_color = Some(color(ThemeColor::Text));
    visuals.weak_text_color = Some(color(ThemeColor::TextDisabled));
    visuals.window_fill = color(ThemeColor::WindowBg);
    visuals.window_stroke = Stroke::new(m.window_border_size, color(ThemeColor::Border));
    visuals.window_shadow.color = color(ThemeColor::BorderShadow);
    visuals.window_corner_radius = CornerRadius::same(m.window_rounding);
    visuals.menu_corner_radius = CornerRadius::same(m.popup_rounding);
    visuals.panel_fill = color(ThemeColor::DockingEmptyBg);
    visuals.extreme_bg_color = color(ThemeColor::FrameBg);
    visuals.text_edit_bg_color = Some(color(ThemeColor::FrameBg));
    visuals.faint_bg_color = color(ThemeColor::TableRowBgAlt);
    visuals.selection.bg_fill = color(ThemeColor::TextSelectedBg);

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_stroke.color = color(ThemeColor::Separator);

    for (state, frame, button) in [
        (&mut widgets.inactive, ThemeColor::FrameBg, ThemeColor::Button),
        (&mut widgets.hovered, ThemeColor::FrameBgHovered, ThemeColor::ButtonHovered),
        (&mut widgets.active, ThemeColor::FrameBgActive, ThemeColor::ButtonActive),
    ] {
        state.bg_fill = color(frame);
        state.weak_bg_fill = color(button);
        state.bg_stroke.width = m.frame_border_size;
        state.corner_radius = CornerRadius::same(m.frame_rounding);
    }
    widgets.open.corner_radius = CornerRadius::same(m.frame_rounding);
}

/// Applies the theme to both the dark and light styles of `ctx`.
pub fn install(ctx: &egui::Context) {
    ctx.all_styles_mut(apply_theme);
    log::debug!("theme installed ({} colors)", PALETTE.len());
}
