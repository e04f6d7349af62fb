use chart_viewport::core::{PixelPoint, PlotArea, ViewportIntent};
use chart_viewport::interaction::{
    GestureBehavior, GestureEffect, GestureRecognizer, GestureState, GestureTuning, PointerId,
};
use chart_viewport::render::{NullRenderer, Renderer};

/// 800 px wide plot whose domain maps one data unit to one pixel.
fn identity_mapping() -> NullRenderer {
    let area = PlotArea::new(0.0, 800.0, 0.0, 400.0).expect("valid plot area");
    let mut renderer = NullRenderer::new(area).expect("renderer init");
    renderer
        .set_visible_domain(0.0, 800.0)
        .expect("visible domain");
    renderer
}

fn point(x: f64, y: f64) -> PixelPoint {
    PixelPoint::new(x, y)
}

fn intents(effects: &[GestureEffect]) -> Vec<ViewportIntent> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            GestureEffect::Intent(intent) => Some(*intent),
            _ => None,
        })
        .collect()
}

#[test]
fn single_pointer_starts_brush_and_captures() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    let effects = recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);
    assert!(effects.contains(&GestureEffect::CapturePointer(PointerId(1))));
    assert!(recognizer.state().is_brushing());

    let effects = recognizer.pointer_move(PointerId(1), point(180.0, 220.0), &mapping);
    let rect = recognizer.selection_rect().expect("selection rect");
    assert!(effects.contains(&GestureEffect::SelectionChanged(Some(rect))));
    assert!((rect.left - 100.0).abs() <= 1e-9);
    assert!((rect.right - 180.0).abs() <= 1e-9);
    assert!((rect.top - 0.0).abs() <= 1e-9);
    assert!((rect.bottom - 400.0).abs() <= 1e-9);
}

#[test]
fn wide_brush_commits_on_release() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(300.0, 200.0), &mapping);
    recognizer.pointer_move(PointerId(1), point(100.0, 200.0), &mapping);
    let effects = recognizer.pointer_up(PointerId(1), point(100.0, 200.0), &mapping);

    assert_eq!(
        intents(&effects),
        vec![ViewportIntent::BrushRange {
            start_value: 300.0,
            end_value: 100.0,
        }]
    );
    assert!(effects.contains(&GestureEffect::SelectionChanged(None)));
    assert!(effects.contains(&GestureEffect::ReleasePointer(PointerId(1))));
    assert!(recognizer.state().is_idle());
    assert!(recognizer.pointers().is_empty());
}

#[test]
fn narrow_brush_is_discarded() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);
    recognizer.pointer_move(PointerId(1), point(104.0, 200.0), &mapping);
    let effects = recognizer.pointer_up(PointerId(1), point(104.0, 200.0), &mapping);

    assert!(intents(&effects).is_empty());
    assert!(effects.contains(&GestureEffect::ReleasePointer(PointerId(1))));
    assert!(recognizer.state().is_idle());
}

#[test]
fn brush_is_clamped_to_plot_area() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(700.0, 200.0), &mapping);
    recognizer.pointer_move(PointerId(1), point(950.0, 200.0), &mapping);
    let rect = recognizer.selection_rect().expect("selection rect");
    assert!((rect.right - 800.0).abs() <= 1e-9);

    let effects = recognizer.pointer_up(PointerId(1), point(950.0, 200.0), &mapping);
    assert_eq!(
        intents(&effects),
        vec![ViewportIntent::BrushRange {
            start_value: 700.0,
            end_value: 800.0,
        }]
    );
}

#[test]
fn pointer_down_outside_plot_area_does_not_brush() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    let effects = recognizer.pointer_down(PointerId(1), point(100.0, 450.0), &mapping);
    assert!(effects.is_empty());
    assert!(recognizer.state().is_idle());
    assert_eq!(recognizer.pointers().len(), 1);
}

#[test]
fn second_pointer_preempts_brush_with_pinch() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(300.0, 200.0), &mapping);
    recognizer.pointer_move(PointerId(1), point(340.0, 200.0), &mapping);
    let effects = recognizer.pointer_down(PointerId(2), point(400.0, 200.0), &mapping);

    assert!(recognizer.state().is_pinching());
    assert!(effects.contains(&GestureEffect::SelectionChanged(None)));
    assert!(effects.contains(&GestureEffect::ReleasePointer(PointerId(1))));
    assert!(intents(&effects).is_empty());
    assert!(recognizer.selection_rect().is_none());

    // Releasing the old brush pointer never commits the abandoned brush.
    let effects = recognizer.pointer_up(PointerId(1), point(340.0, 200.0), &mapping);
    assert!(intents(&effects).is_empty());
    assert!(recognizer.state().is_idle());
}

#[test]
fn pinch_emits_anchored_zoom_once_threshold_is_crossed() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(300.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(2), point(400.0, 200.0), &mapping);

    let effects = recognizer.pointer_move(PointerId(2), point(400.5, 200.0), &mapping);
    assert!(intents(&effects).is_empty());

    let effects = recognizer.pointer_move(PointerId(2), point(500.0, 200.0), &mapping);
    let emitted = intents(&effects);
    assert_eq!(emitted.len(), 1);
    match emitted[0] {
        ViewportIntent::ZoomAroundValue {
            center_value,
            multiplier,
        } => {
            assert!((center_value - 400.0).abs() <= 1e-9);
            assert!((multiplier - 0.5).abs() <= 1e-9);
        }
        other => panic!("unexpected intent: {other:?}"),
    }
}

#[test]
fn pinch_accumulates_small_moves_against_last_emitted_distance() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(300.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(2), point(400.0, 200.0), &mapping);

    assert!(intents(&recognizer.pointer_move(PointerId(2), point(400.6, 200.0), &mapping)).is_empty());
    let emitted = intents(&recognizer.pointer_move(PointerId(2), point(402.0, 200.0), &mapping));
    match emitted.as_slice() {
        [ViewportIntent::ZoomAroundValue { multiplier, .. }] => {
            assert!((multiplier - 100.0 / 102.0).abs() <= 1e-9);
        }
        other => panic!("unexpected intents: {other:?}"),
    }
}

#[test]
fn pinch_ends_when_a_pointer_lifts() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(300.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(2), point(400.0, 200.0), &mapping);
    recognizer.pointer_up(PointerId(2), point(400.0, 200.0), &mapping);

    assert!(recognizer.state().is_idle());
    assert_eq!(recognizer.pointers().len(), 1);

    let effects = recognizer.pointer_move(PointerId(1), point(350.0, 200.0), &mapping);
    assert!(effects.is_empty());
}

#[test]
fn disabled_pinch_ignores_second_pointer() {
    let mapping = identity_mapping();
    let behavior = GestureBehavior {
        pinch_zoom: false,
        ..GestureBehavior::default()
    };
    let mut recognizer = GestureRecognizer::new(behavior, GestureTuning::default());

    recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(2), point(400.0, 200.0), &mapping);
    assert!(recognizer.state().is_brushing());
}

#[test]
fn drag_pan_replaces_brush_when_enabled() {
    let mapping = identity_mapping();
    let behavior = GestureBehavior {
        brushing: false,
        drag_pan: true,
        ..GestureBehavior::default()
    };
    let mut recognizer = GestureRecognizer::new(behavior, GestureTuning::default());

    let effects = recognizer.pointer_down(PointerId(7), point(400.0, 200.0), &mapping);
    assert!(effects.contains(&GestureEffect::CapturePointer(PointerId(7))));
    assert!(recognizer.state().is_panning());

    let effects = recognizer.pointer_move(PointerId(7), point(480.0, 200.0), &mapping);
    assert_eq!(
        intents(&effects),
        vec![ViewportIntent::PanByWindowFraction(-0.1)]
    );

    let effects = recognizer.pointer_up(PointerId(7), point(480.0, 200.0), &mapping);
    assert!(effects.contains(&GestureEffect::ReleasePointer(PointerId(7))));
    assert!(recognizer.state().is_idle());
}

#[test]
fn brushing_disabled_without_pan_stays_idle() {
    let mapping = identity_mapping();
    let behavior = GestureBehavior {
        brushing: false,
        ..GestureBehavior::default()
    };
    let mut recognizer = GestureRecognizer::new(behavior, GestureTuning::default());

    let effects = recognizer.pointer_down(PointerId(1), point(400.0, 200.0), &mapping);
    assert!(effects.is_empty());
    assert!(recognizer.state().is_idle());
}

#[test]
fn cancel_abandons_brush_without_commit() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);
    recognizer.pointer_move(PointerId(1), point(500.0, 200.0), &mapping);
    let effects = recognizer.pointer_cancel(PointerId(1));

    assert!(intents(&effects).is_empty());
    assert!(effects.contains(&GestureEffect::SelectionChanged(None)));
    assert!(effects.contains(&GestureEffect::ReleasePointer(PointerId(1))));
    assert!(recognizer.state().is_idle());
    assert!(recognizer.pointer_cancel(PointerId(1)).is_empty());
}

#[test]
fn leave_commits_like_release_for_tracked_pointer() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    assert!(
        recognizer
            .pointer_leave(PointerId(9), point(10.0, 10.0), &mapping)
            .is_empty()
    );

    recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);
    let effects = recognizer.pointer_leave(PointerId(1), point(200.0, 200.0), &mapping);
    assert_eq!(
        intents(&effects),
        vec![ViewportIntent::BrushRange {
            start_value: 100.0,
            end_value: 200.0,
        }]
    );
}

#[test]
fn untracked_pointer_moves_are_ignored() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);
    let effects = recognizer.pointer_move(PointerId(2), point(600.0, 200.0), &mapping);
    assert!(effects.is_empty());
    let rect = recognizer.selection_rect().expect("selection rect");
    assert!((rect.right - 100.0).abs() <= 1e-9);
}

#[test]
fn wheel_zoom_is_anchored_and_stateless() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();
    recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);
    let before = recognizer.state();

    let intent = recognizer
        .wheel(point(400.0, 200.0), -120.0, &mapping)
        .expect("wheel intent");
    match intent {
        ViewportIntent::ZoomAroundValue {
            center_value,
            multiplier,
        } => {
            assert!((center_value - 400.0).abs() <= 1e-9);
            assert!((multiplier - 1.0 / 1.1).abs() <= 1e-12);
        }
        other => panic!("unexpected intent: {other:?}"),
    }
    assert_eq!(recognizer.state(), before);

    let multiplier = recognizer.wheel_multiplier(240.0).expect("zoom out");
    assert!((multiplier - 1.21).abs() <= 1e-12);
    assert!(recognizer.wheel_multiplier(0.0).is_none());
    assert!(recognizer.wheel_multiplier(f64::NAN).is_none());
}

#[test]
fn disabled_wheel_zoom_emits_nothing() {
    let mapping = identity_mapping();
    let behavior = GestureBehavior {
        wheel_zoom: false,
        ..GestureBehavior::default()
    };
    let recognizer = GestureRecognizer::new(behavior, GestureTuning::default());
    assert!(
        recognizer
            .wheel(point(400.0, 200.0), -120.0, &mapping)
            .is_none()
    );
}

#[test]
fn gestures_need_a_rendered_domain() {
    let area = PlotArea::new(0.0, 800.0, 0.0, 400.0).expect("valid plot area");
    let mapping = NullRenderer::new(area).expect("renderer init");
    let mut recognizer = GestureRecognizer::default();

    assert!(
        recognizer
            .wheel(point(400.0, 200.0), -120.0, &mapping)
            .is_none()
    );
    recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);
    let effects = recognizer.pointer_up(PointerId(1), point(300.0, 200.0), &mapping);
    assert!(intents(&effects).is_empty());
    assert!(recognizer.state().is_idle());
}

#[test]
fn reset_drops_pointers_and_gesture() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();
    recognizer.pointer_down(PointerId(1), point(100.0, 200.0), &mapping);

    let effects = recognizer.reset();
    assert!(effects.contains(&GestureEffect::ReleasePointer(PointerId(1))));
    assert!(recognizer.state().is_idle());
    assert!(recognizer.pointers().is_empty());
}

fn pinch_distance(recognizer: &GestureRecognizer) -> f64 {
    match recognizer.state() {
        GestureState::Pinching {
            pointer_distance, ..
        } => pointer_distance,
        other => panic!("expected pinch, got {other:?}"),
    }
}

#[test]
fn lifting_a_pinch_pointer_rebaselines_on_the_next_pair() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(390.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(2), point(410.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(3), point(700.0, 200.0), &mapping);
    assert!((pinch_distance(&recognizer) - 20.0).abs() <= 1e-9);

    let effects = recognizer.pointer_up(PointerId(1), point(390.0, 200.0), &mapping);
    assert!(intents(&effects).is_empty());
    assert!(recognizer.state().is_pinching());
    assert!((pinch_distance(&recognizer) - 290.0).abs() <= 1e-9);

    let effects = recognizer.pointer_move(PointerId(2), point(411.0, 200.0), &mapping);
    assert!(intents(&effects).is_empty());

    let effects = recognizer.pointer_move(PointerId(2), point(400.0, 200.0), &mapping);
    match intents(&effects).as_slice() {
        [ViewportIntent::ZoomAroundValue {
            center_value,
            multiplier,
        }] => {
            assert!((center_value - 550.0).abs() <= 1e-9);
            assert!((multiplier - 290.0 / 300.0).abs() <= 1e-9);
        }
        other => panic!("unexpected intents: {other:?}"),
    }
}

#[test]
fn cancelling_a_pinch_pointer_rebaselines_on_the_next_pair() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(390.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(2), point(410.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(3), point(700.0, 200.0), &mapping);

    let effects = recognizer.pointer_cancel(PointerId(2));
    assert!(effects.is_empty());
    assert!((pinch_distance(&recognizer) - 310.0).abs() <= 1e-9);

    let effects = recognizer.pointer_move(PointerId(3), point(701.0, 200.0), &mapping);
    assert!(intents(&effects).is_empty());
}

#[test]
fn lifting_a_pointer_outside_the_pinch_pair_keeps_the_baseline() {
    let mapping = identity_mapping();
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(300.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(2), point(400.0, 200.0), &mapping);
    recognizer.pointer_move(PointerId(2), point(400.6, 200.0), &mapping);
    recognizer.pointer_down(PointerId(3), point(700.0, 200.0), &mapping);
    recognizer.pointer_up(PointerId(3), point(700.0, 200.0), &mapping);

    assert!(recognizer.state().is_pinching());
    assert!((pinch_distance(&recognizer) - 100.0).abs() <= 1e-9);
}

#[test]
fn unmapped_pinch_step_keeps_previous_baseline() {
    let area = PlotArea::new(0.0, 800.0, 0.0, 400.0).expect("valid plot area");
    let mut mapping = NullRenderer::new(area).expect("renderer init");
    let mut recognizer = GestureRecognizer::default();

    recognizer.pointer_down(PointerId(1), point(300.0, 200.0), &mapping);
    recognizer.pointer_down(PointerId(2), point(400.0, 200.0), &mapping);
    let effects = recognizer.pointer_move(PointerId(2), point(500.0, 200.0), &mapping);
    assert!(intents(&effects).is_empty());
    assert!((pinch_distance(&recognizer) - 100.0).abs() <= 1e-9);

    mapping
        .set_visible_domain(0.0, 800.0)
        .expect("visible domain");
    let effects = recognizer.pointer_move(PointerId(2), point(501.0, 200.0), &mapping);
    match intents(&effects).as_slice() {
        [ViewportIntent::ZoomAroundValue { multiplier, .. }] => {
            assert!((multiplier - 100.0 / 201.0).abs() <= 1e-9);
        }
        other => panic!("unexpected intents: {other:?}"),
    }
}
