//! Per-frame widget tree.
//!
//! The windows live as tabs of an [`egui_dock`] dock area filling the space
//! under the menu bar. "My GUI" starts docked; the other two open as floating
//! dock windows that can be dragged back into the dock or merged as tabs.

use egui::{CentralPanel, Context, Frame, Id, Rect, Slider, TextEdit, TopBottomPanel, Ui};
use egui_demo_lib::{View as _, WidgetGallery};
use egui_dock::{DockArea, DockState, TabViewer};
use guihost_core::{FrameTiming, UiAction, UiState};

use crate::theme::{self, ThemeColor};

/// Title of the top-level menu.
pub const MENU_TITLE: &str = "中文菜单";
/// The menu's items. Selecting one only closes the menu.
pub const MENU_ITEMS: [&str; 2] = ["我是菜单 1", "中文测试"];

/// Size of the secondary window when it opens.
pub const ANOTHER_WINDOW_SIZE: [f32; 2] = [200.0, 100.0];
/// Where the library demo window appears when it opens.
pub const DEMO_WINDOW_POS: [f32; 2] = [650.0, 20.0];

/// Stable identities of windows and stateful widgets.
///
/// Hashed into [`egui::Id`]s so that relabeling a widget keeps its memory
/// (text cursor, open menus, dock tab state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    MenuBar,
    Dockspace,
    MainWindow,
    Slider,
    ClearColor,
    TextInput,
    AnotherWindow,
    DemoWindow,
}

impl WidgetId {
    pub fn id(self) -> Id {
        Id::new(("guihost", self))
    }
}

/// Windows the composition can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Main,
    Another,
    Demo,
}

impl WindowKind {
    pub const ALL: [Self; 3] = [Self::Main, Self::Another, Self::Demo];

    pub fn title(self) -> &'static str {
        match self {
            Self::Main => "My GUI",
            Self::Another => "Another Window",
            Self::Demo => "Widget Gallery",
        }
    }

    pub fn widget_id(self) -> WidgetId {
        match self {
            Self::Main => WidgetId::MainWindow,
            Self::Another => WidgetId::AnotherWindow,
            Self::Demo => WidgetId::DemoWindow,
        }
    }

    /// Whether `state` asks for this window.
    fn wanted(self, state: &UiState) -> bool {
        match self {
            Self::Main => true,
            Self::Another => state.show_another_window,
            Self::Demo => state.show_demo_window,
        }
    }
}

/// Dock layout and the demo gallery's widget state, kept across frames.
pub struct Dockspace {
    tree: DockState<WindowKind>,
    gallery: WidgetGallery,
}

impl Default for Dockspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Dockspace {
    pub fn new() -> Self {
        Self {
            tree: DockState::new(vec![WindowKind::Main]),
            gallery: WidgetGallery::default(),
        }
    }

    /// Whether `kind` is docked or floating somewhere in the dock space.
    pub fn contains(&self, kind: WindowKind) -> bool {
        self.tree.iter_all_tabs().any(|(_, tab)| *tab == kind)
    }

    /// Opens and closes tabs so the dock matches the visibility flags.
    fn sync(&mut self, state: &UiState) {
        let another = state.show_another_window;
        let demo = state.show_demo_window;
        self.tree.retain_tabs(move |tab| match tab {
            WindowKind::Main => true,
            WindowKind::Another => another,
            WindowKind::Demo => demo,
        });

        for kind in WindowKind::ALL {
            if kind.wanted(state) && !self.contains(kind) {
                self.open(kind);
            }
        }
    }

    fn open(&mut self, kind: WindowKind) {
        match kind {
            WindowKind::Main => self.tree.main_surface_mut().push_to_first_leaf(kind),
            WindowKind::Another => {
                let surface = self.tree.add_window(vec![kind]);
                if let Some(window) = self.tree.get_window_state_mut(surface) {
                    window.set_size(ANOTHER_WINDOW_SIZE.into());
                }
            }
            WindowKind::Demo => {
                let surface = self.tree.add_window(vec![kind]);
                if let Some(window) = self.tree.get_window_state_mut(surface) {
                    window.set_position(DEMO_WINDOW_POS.into());
                }
            }
        }
        log::debug!("opened {kind:?}");
    }
}

/// What one call to [`compose_frame`] declared.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Windows present in the dock space at the end of the frame.
    pub windows: Vec<WindowKind>,
    /// The dock space area.
    pub dock_rect: Rect,
    /// Whether the menu bar was declared.
    pub menu_bar: bool,
    /// Actions collected from widgets and applied at the end of the frame.
    pub actions: Vec<UiAction>,
}

impl FrameReport {
    pub fn declared(&self, kind: WindowKind) -> bool {
        self.windows.contains(&kind)
    }
}

/// Declares one frame of UI against `ctx`.
///
/// Must run between `begin_pass` and `end_pass` (or inside `Context::run`).
/// A window the user closes through its tab clears its visibility flag.
pub fn compose_frame(
    ctx: &Context,
    state: &mut UiState,
    dock: &mut Dockspace,
    timing: &FrameTiming,
) -> FrameReport {
    let menu_bar = state.show_menu_bar;
    if menu_bar {
        menu_bar_panel(ctx);
    }

    dock.sync(state);

    let mut actions = Vec::new();
    let dock_rect = {
        let Dockspace { tree, gallery } = dock;
        let mut tabs = Tabs {
            state: &mut *state,
            timing,
            actions: &mut actions,
            gallery,
        };
        dock_area(ctx, tree, &mut tabs)
    };

    if state.show_another_window && !dock.contains(WindowKind::Another) {
        state.show_another_window = false;
    }
    if state.show_demo_window && !dock.contains(WindowKind::Demo) {
        state.show_demo_window = false;
    }

    let windows = WindowKind::ALL
        .into_iter()
        .filter(|kind| dock.contains(*kind))
        .collect();

    for action in &actions {
        state.apply(*action);
    }

    FrameReport {
        windows,
        dock_rect,
        menu_bar,
        actions,
    }
}

fn menu_bar_panel(ctx: &Context) {
    TopBottomPanel::top(WidgetId::MenuBar.id())
        .frame(Frame::side_top_panel(&ctx.style()).fill(theme::color(ThemeColor::MenuBarBg)))
        .show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button(MENU_TITLE, |ui| {
                    for item in MENU_ITEMS {
                        if ui.button(item).clicked() {
                            ui.close();
                        }
                    }
                });
            });
        });
}

/// Shows the dock area in whatever the menu bar leaves of the viewport and
/// returns that area.
fn dock_area(ctx: &Context, tree: &mut DockState<WindowKind>, tabs: &mut Tabs<'_>) -> Rect {
    CentralPanel::default()
        .frame(Frame::NONE.fill(theme::color(ThemeColor::DockingEmptyBg)))
        .show(ctx, |ui| {
            let rect = ui.max_rect();
            DockArea::new(tree)
                .id(WidgetId::Dockspace.id())
                .style(egui_dock::Style::from_egui(ui.style().as_ref()))
                .show_inside(ui, tabs);
            rect
        })
        .inner
}

struct Tabs<'a> {
    state: &'a mut UiState,
    timing: &'a FrameTiming,
    actions: &'a mut Vec<UiAction>,
    gallery: &'a mut WidgetGallery,
}

impl TabViewer for Tabs<'_> {
    type Tab = WindowKind;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        tab.title().into()
    }

    fn id(&mut self, tab: &mut Self::Tab) -> Id {
        tab.widget_id().id()
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        match tab {
            WindowKind::Main => main_window_ui(ui, self.state, self.timing, self.actions),
            WindowKind::Another => {
                ui.label("Hello");
            }
            WindowKind::Demo => self.gallery.ui(ui),
        }
    }
}

fn main_window_ui(
    ui: &mut Ui,
    state: &mut UiState,
    timing: &FrameTiming,
    actions: &mut Vec<UiAction>,
) {
    ui.label("Hello, world!");

    ui.push_id(WidgetId::Slider, |ui| {
        ui.add(Slider::new(&mut state.slider_value, 0.0..=1.0).text("float"));
    });

    ui.push_id(WidgetId::ClearColor, |ui| {
        ui.horizontal(|ui| {
            ui.color_edit_button_rgb(&mut state.clear_color);
            ui.label("clear color");
        });
    });

    if ui.button("Test Window").clicked() {
        actions.push(UiAction::ToggleDemoWindow);
    }
    if ui.button("Another Window").clicked() {
        actions.push(UiAction::ToggleAnotherWindow);
    }

    ui.label(timing.readout());

    ui.add(
        TextEdit::singleline(&mut state.text)
            .id(WidgetId::TextInput.id())
            .hint_text("Text input"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn screen() -> Rect {
        Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1024.0, 768.0))
    }

    fn run_frame(
        ctx: &Context,
        state: &mut UiState,
        dock: &mut Dockspace,
        timing: &FrameTiming,
    ) -> FrameReport {
        let input = egui::RawInput {
            screen_rect: Some(screen()),
            ..Default::default()
        };
        let mut report = None;
        let _ = ctx.run(input, |ctx| {
            report = Some(compose_frame(ctx, state, dock, timing));
        });
        report.unwrap()
    }

    #[test]
    fn test_default_frame_declares_main_window_only() {
        let ctx = Context::default();
        let mut state = UiState::default();
        let mut dock = Dockspace::new();
        let report = run_frame(&ctx, &mut state, &mut dock, &FrameTiming::default());

        assert_eq!(report.windows, vec![WindowKind::Main]);
        assert!(report.menu_bar);
        assert!(report.actions.is_empty());
    }

    #[test]
    fn test_flags_declare_windows() {
        let ctx = Context::default();
        let mut state = UiState {
            show_another_window: true,
            show_demo_window: true,
            ..UiState::default()
        };
        let mut dock = Dockspace::new();
        let report = run_frame(&ctx, &mut state, &mut dock, &FrameTiming::default());

        assert_eq!(
            report.windows,
            vec![WindowKind::Main, WindowKind::Another, WindowKind::Demo]
        );
        assert!(state.show_another_window);
        assert!(state.show_demo_window);
    }

    #[test]
    fn test_cleared_flag_removes_tab() {
        let ctx = Context::default();
        let mut state = UiState::default();
        let mut dock = Dockspace::new();
        let timing = FrameTiming::default();

        let before = run_frame(&ctx, &mut state, &mut dock, &timing);
        assert!(!before.declared(WindowKind::Another));

        state.apply(UiAction::ToggleAnotherWindow);
        let after = run_frame(&ctx, &mut state, &mut dock, &timing);
        assert!(after.declared(WindowKind::Another));
        assert!(!after.declared(WindowKind::Demo));

        state.apply(UiAction::ToggleAnotherWindow);
        let hidden = run_frame(&ctx, &mut state, &mut dock, &timing);
        assert!(!hidden.declared(WindowKind::Another));
        assert!(!dock.contains(WindowKind::Another));
        assert!(dock.contains(WindowKind::Main));
    }

    #[test]
    fn test_reopening_does_not_duplicate_tabs() {
        let ctx = Context::default();
        let mut state = UiState {
            show_demo_window: true,
            ..UiState::default()
        };
        let mut dock = Dockspace::new();
        let timing = FrameTiming::default();

        for _ in 0..3 {
            run_frame(&ctx, &mut state, &mut dock, &timing);
        }
        let demos = dock
            .tree
            .iter_all_tabs()
            .filter(|(_, tab)| **tab == WindowKind::Demo)
            .count();
        assert_eq!(demos, 1);
    }

    #[test]
    fn test_dock_covers_screen_without_menu_bar() {
        let ctx = Context::default();
        let mut state = UiState {
            show_menu_bar: false,
            ..UiState::default()
        };
        let mut dock = Dockspace::new();
        let report = run_frame(&ctx, &mut state, &mut dock, &FrameTiming::default());

        assert!(!report.menu_bar);
        assert_eq!(report.dock_rect, screen());
    }

    #[test]
    fn test_menu_bar_takes_top_of_screen() {
        let ctx = Context::default();
        let mut state = UiState::default();
        let mut dock = Dockspace::new();
        let report = run_frame(&ctx, &mut state, &mut dock, &FrameTiming::default());

        assert!(report.dock_rect.top() > screen().top());
        assert!((report.dock_rect.bottom() - screen().bottom()).abs() < 1.0);
        assert!((report.dock_rect.width() - screen().width()).abs() < 1.0);
    }

    #[test]
    fn test_text_survives_frames() {
        let ctx = Context::default();
        let mut state = UiState::default();
        let mut dock = Dockspace::new();
        state.text = guihost_core::FixedTextBuffer::from_text("中文");
        let timing = FrameTiming {
            delta: Duration::from_millis(16),
            total: Duration::from_millis(16),
            framerate: 60.0,
        };
        run_frame(&ctx, &mut state, &mut dock, &timing);
        run_frame(&ctx, &mut state, &mut dock, &timing);
        assert_eq!(state.text.as_str(), "中文");
    }

    #[test]
    fn test_widget_ids_are_distinct() {
        let all = [
            WidgetId::MenuBar,
            WidgetId::Dockspace,
            WidgetId::MainWindow,
            WidgetId::Slider,
            WidgetId::ClearColor,
            WidgetId::TextInput,
            WidgetId::AnotherWindow,
            WidgetId::DemoWindow,
        ];
        let ids: std::collections::HashSet<_> = all.iter().map(|w| w.id()).collect();
        assert_eq!(ids.len(), all.len());
    }
}
