#![allow(clippy::float_cmp)]

use super::*;
use crate::fakes_test::{Call, RecordingSurface};

fn style(centered: bool) -> TextStyle<'static> {
    TextStyle { font_family: "Arial", font_size: 12.0, centered, color: "black" }
}

fn surface() -> RecordingSurface {
    RecordingSurface::new(640.0, 480.0)
}

// =============================================================
// clear
// =============================================================

#[test]
fn clear_erases_full_surface() {
    let s = surface();
    clear(&s);
    assert_eq!(s.calls(), [Call::ClearRect(0.0, 0.0, 640.0, 480.0)]);
}

// =============================================================
// circle
// =============================================================

#[test]
fn circle_strokes_full_arc() {
    let s = surface();
    assert!(circle(&s, 50.0, 60.0, 10.0).is_ok());
    assert_eq!(s.calls(), [Call::BeginPath, Call::Arc(50.0, 60.0, 10.0, 0.0, 2.0 * PI), Call::Stroke]);
}

#[test]
fn circle_negative_radius_propagates_host_error() {
    let s = surface();
    let result = circle(&s, 0.0, 0.0, -1.0);
    assert!(matches!(result, Err(CanvasError::Host(_))));
    assert!(!s.calls().contains(&Call::Stroke));
}

// =============================================================
// rect
// =============================================================

#[test]
fn rect_strokes_outline_in_fresh_path() {
    let s = surface();
    rect(&s, 1.0, 2.0, 3.0, 4.0);
    assert_eq!(s.calls(), [Call::BeginPath, Call::Rect(1.0, 2.0, 3.0, 4.0), Call::Stroke]);
}

// =============================================================
// text
// =============================================================

#[test]
fn text_stacks_lines_by_font_size() {
    let s = surface();
    assert!(text(&s, "a\nb", 10.0, 20.0, &style(true)).is_ok());
    assert_eq!(s.fill_texts(), [("a".to_owned(), 10.0, 20.0), ("b".to_owned(), 10.0, 32.0)]);
}

#[test]
fn text_sets_font_and_color_before_drawing() {
    let s = surface();
    let st = TextStyle { font_family: "Courier New", font_size: 18.0, centered: false, color: "red" };
    assert!(text(&s, "hi", 0.0, 0.0, &st).is_ok());
    assert_eq!(
        s.calls(),
        [
            Call::Font("18px Courier New".into()),
            Call::FillStyle("red".into()),
            Call::FillText("hi".into(), 0.0, 0.0),
        ]
    );
}

#[test]
fn text_centered_sets_alignment() {
    let s = surface();
    assert!(text(&s, "x", 0.0, 0.0, &style(true)).is_ok());
    assert!(s.calls().contains(&Call::TextAlign("center".into())));
}

#[test]
fn text_uncentered_leaves_alignment_alone() {
    let s = surface();
    assert!(text(&s, "x", 0.0, 0.0, &style(false)).is_ok());
    assert!(!s.calls().iter().any(|c| matches!(c, Call::TextAlign(_))));
}

#[test]
fn text_keeps_empty_lines() {
    let s = surface();
    assert!(text(&s, "a\n\nc\n", 0.0, 0.0, &style(false)).is_ok());
    let ys: Vec<f64> = s.fill_texts().iter().map(|(_, _, y)| *y).collect();
    assert_eq!(ys, [0.0, 12.0, 24.0, 36.0]);
}

#[test]
fn text_stops_at_first_failing_line() {
    let mut s = surface();
    s.fail_text = Some("b".into());
    let result = text(&s, "a\nb\nc", 0.0, 0.0, &style(false));
    assert!(matches!(result, Err(CanvasError::Host(_))));
    assert_eq!(s.fill_texts().len(), 1);
}

// =============================================================
// font_spec
// =============================================================

#[test]
fn font_spec_formats_integral_sizes_without_fraction() {
    assert_eq!(font_spec(12.0, "Arial"), "12px Arial");
}

#[test]
fn font_spec_keeps_fractional_sizes() {
    assert_eq!(font_spec(10.5, "serif"), "10.5px serif");
}
