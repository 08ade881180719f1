//! Multi-frame composition tests.
//!
//! These drive `compose_frame` through a bare `egui::Context`, so no window
//! or GPU is needed.

use egui::epaint::{ClippedShape, Shape};
use egui::{Event, Modifiers, Pos2, PointerButton, Rect};
use guihost::{
    compose_frame, Dockspace, FrameClock, FrameReport, FrameTiming, Options, UiAction, UiState,
    WidgetId, WindowKind,
};
use std::time::{Duration, Instant};

/// Seconds of input time between frames, long enough that two clicks never
/// count as a double click.
const FRAME_STEP: f64 = 0.25;

struct Harness {
    ctx: egui::Context,
    state: UiState,
    dock: Dockspace,
    time: f64,
    shapes: Vec<ClippedShape>,
}

impl Harness {
    fn new(options: &Options) -> Self {
        Self {
            ctx: egui::Context::default(),
            state: UiState::from_options(options),
            dock: Dockspace::new(),
            time: 0.0,
            shapes: Vec::new(),
        }
    }

    fn frame(&mut self, events: Vec<Event>, timing: &FrameTiming) -> FrameReport {
        self.time += FRAME_STEP;
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(1024.0, 768.0))),
            time: Some(self.time),
            events,
            ..Default::default()
        };
        let (state, dock) = (&mut self.state, &mut self.dock);
        let mut report = None;
        let output = self.ctx.run(input, |ctx| {
            report = Some(compose_frame(ctx, state, dock, timing));
        });
        self.shapes = output.shapes;
        report.unwrap()
    }

    /// Moves the pointer to `pos`, presses and releases it over three frames.
    /// Returns the report of the release frame.
    fn click(&mut self, pos: Pos2, timing: &FrameTiming) -> FrameReport {
        let button = |pressed| Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        };
        self.frame(vec![Event::PointerMoved(pos)], timing);
        self.frame(vec![button(true)], timing);
        self.frame(vec![button(false)], timing)
    }

    /// Screen rects of every painted text equal to `text`, in paint order.
    fn text_rects(&self, text: &str) -> Vec<Rect> {
        let mut rects = Vec::new();
        for clipped in &self.shapes {
            collect_text(&clipped.shape, text, &mut rects);
        }
        rects
    }

    fn focus_text_input(&self) {
        self.ctx
            .memory_mut(|m| m.request_focus(WidgetId::TextInput.id()));
    }
}

fn collect_text(shape: &Shape, text: &str, out: &mut Vec<Rect>) {
    match shape {
        Shape::Text(shape) if shape.galley.text() == text => {
            out.push(shape.galley.rect.translate(shape.pos.to_vec2()));
        }
        Shape::Vec(shapes) => {
            for shape in shapes {
                collect_text(shape, text, out);
            }
        }
        _ => {}
    }
}

/// Clicks the "My GUI" button labeled `label`. Panels paint before floating
/// windows, so the first match is the docked button.
fn click_button(h: &mut Harness, label: &str, timing: &FrameTiming) -> FrameReport {
    let rect = h.text_rects(label)[0];
    h.click(rect.center(), timing)
}

#[test]
fn test_window_set_follows_flags_across_frames() {
    let mut h = Harness::new(&Options::default());
    let timing = FrameTiming::default();

    let mut seen = Vec::new();
    for action in [
        None,
        Some(UiAction::ToggleDemoWindow),
        Some(UiAction::ToggleAnotherWindow),
        Some(UiAction::ToggleDemoWindow),
    ] {
        if let Some(action) = action {
            h.state.apply(action);
        }
        seen.push(h.frame(Vec::new(), &timing).windows);
    }

    assert_eq!(seen[0], vec![WindowKind::Main]);
    assert_eq!(seen[1], vec![WindowKind::Main, WindowKind::Demo]);
    assert_eq!(
        seen[2],
        vec![WindowKind::Main, WindowKind::Another, WindowKind::Demo]
    );
    assert_eq!(seen[3], vec![WindowKind::Main, WindowKind::Another]);
}

#[test]
fn test_options_disable_menu_bar() {
    let options = Options {
        show_menu_bar: false,
        ..Options::default()
    };
    let mut h = Harness::new(&options);
    let report = h.frame(Vec::new(), &FrameTiming::default());
    assert!(!report.menu_bar);
    assert!(report.dock_rect.top().abs() < f32::EPSILON);
}

#[test]
fn test_typing_into_focused_text_input() {
    let mut h = Harness::new(&Options::default());
    let timing = FrameTiming::default();

    h.frame(Vec::new(), &timing);
    h.focus_text_input();
    h.frame(vec![egui::Event::Text("你好 guihost".to_string())], &timing);

    assert_eq!(h.state.text.as_str(), "你好 guihost");
}

#[test]
fn test_text_input_stops_at_capacity() {
    let mut h = Harness::new(&Options::default());
    let timing = FrameTiming::default();

    h.frame(Vec::new(), &timing);
    h.focus_text_input();
    h.frame(vec![egui::Event::Text("x".repeat(150))], &timing);

    assert_eq!(h.state.text.len(), guihost::FixedTextBuffer::<100>::CAPACITY);
}

#[test]
fn test_clock_feeds_readout() {
    let mut clock = FrameClock::new();
    let start = Instant::now();
    let mut timing = clock.tick(start);
    for i in 1..=10 {
        timing = clock.tick(start + Duration::from_millis(20 * i));
    }
    assert_eq!(
        timing.readout(),
        "Application average 20.000 ms/frame (50.0 FPS)"
    );

    let mut h = Harness::new(&Options::default());
    let report = h.frame(Vec::new(), &timing);
    assert!(report.declared(WindowKind::Main));
}

#[test]
fn test_test_window_button_opens_demo() {
    let mut h = Harness::new(&Options::default());
    let timing = FrameTiming::default();
    h.frame(Vec::new(), &timing);

    let release = click_button(&mut h, "Test Window", &timing);
    assert_eq!(release.actions, vec![UiAction::ToggleDemoWindow]);
    assert!(h.state.show_demo_window);

    let next = h.frame(Vec::new(), &timing);
    assert_eq!(next.windows, vec![WindowKind::Main, WindowKind::Demo]);
}

#[test]
fn test_another_window_button_opens_another() {
    let mut h = Harness::new(&Options::default());
    let timing = FrameTiming::default();
    h.frame(Vec::new(), &timing);

    let release = click_button(&mut h, "Another Window", &timing);
    assert_eq!(release.actions, vec![UiAction::ToggleAnotherWindow]);

    let next = h.frame(Vec::new(), &timing);
    assert_eq!(next.windows, vec![WindowKind::Main, WindowKind::Another]);
    assert!(h.state.show_another_window);
}

#[test]
fn test_closing_another_window_clears_flag() {
    let mut h = Harness::new(&Options::default());
    let timing = FrameTiming::default();
    h.state.apply(UiAction::ToggleAnotherWindow);
    h.frame(Vec::new(), &timing);
    let report = h.frame(Vec::new(), &timing);
    assert!(report.declared(WindowKind::Another));

    // The floating window paints after the docked button with the same label.
    let title = *h
        .text_rects(WindowKind::Another.title())
        .last()
        .unwrap();

    // The tab's close button sits right of its title.
    let mut offset = 2.0;
    while h.state.show_another_window && offset <= 40.0 {
        h.click(egui::pos2(title.right() + offset, title.center().y), &timing);
        offset += 2.0;
    }
    assert!(!h.state.show_another_window);

    let report = h.frame(Vec::new(), &timing);
    assert!(!report.declared(WindowKind::Another));
    assert!(!h.dock.contains(WindowKind::Another));
    assert!(report.declared(WindowKind::Main));

    // The button brings it back.
    click_button(&mut h, "Another Window", &timing);
    let report = h.frame(Vec::new(), &timing);
    assert!(report.declared(WindowKind::Another));
}
