mod common;

use neurolabel_core::canvas::AnnotationCanvas;
use neurolabel_core::geometry::{Point, ScreenRect};
use neurolabel_core::hit::{hit_test, HitTarget};
use neurolabel_core::selection::HandleRole;

use common::{canvas_with, click, drag_to, press, record};

fn two_box_canvas() -> AnnotationCanvas {
    canvas_with(
        vec![
            record("A", 0.9, 10.0, 10.0, 60.0, 60.0),
            record("B", 0.2, 40.0, 40.0, 90.0, 90.0),
        ],
        100,
        100,
    )
}

#[test]
fn test_threshold_hides_low_confidence() {
    let mut canvas = two_box_canvas();
    canvas.set_threshold(0.5);
    let scene = canvas.scene();
    assert_eq!(scene.shapes.len(), 1);
    assert_eq!(scene.shapes[0].label, "A");
    assert_eq!(canvas.visible_count(), 1);
    assert_eq!(canvas.store().len(), 2);

    canvas.set_threshold(0.1);
    let labels: Vec<_> = canvas.scene().shapes.iter().map(|s| s.label.clone()).collect();
    assert_eq!(labels, vec!["A", "B"]);
}

#[test]
fn test_threshold_clamped() {
    let mut canvas = two_box_canvas();
    canvas.set_threshold(1.7);
    assert_eq!(canvas.threshold(), 1.0);
    canvas.set_threshold(-0.3);
    assert_eq!(canvas.threshold(), 0.0);
}

#[test]
fn test_scene_is_deterministic() {
    let canvas = two_box_canvas();
    assert_eq!(canvas.scene(), canvas.scene());
}

#[test]
fn test_scene_empty_until_decoded() {
    let mut canvas = AnnotationCanvas::new(0.0);
    canvas.load_detections(vec![record("A", 0.9, 10.0, 10.0, 60.0, 60.0)]);
    let scene = canvas.scene();
    assert!(scene.image_rect.is_none());
    assert!(scene.shapes.is_empty());
}

#[test]
fn test_scene_image_rect_tracks_viewport() {
    let canvas = two_box_canvas();
    assert_eq!(
        canvas.scene().image_rect,
        Some(ScreenRect::new(0.0, 0.0, 100.0, 100.0))
    );
}

#[test]
fn test_hidden_selection_has_no_handles() {
    let mut canvas = two_box_canvas();
    let b = canvas.store().iter().nth(1).unwrap().id;
    canvas.select(b);
    assert_eq!(canvas.scene().handles.owner, Some(b));

    canvas.set_threshold(0.5);
    assert!(canvas.scene().handles.is_empty());
    assert_eq!(canvas.selected(), Some(b));
}

#[test]
fn test_gesture_preview_in_scene() {
    let mut canvas = two_box_canvas();
    press(&mut canvas, 20.0, 20.0);
    drag_to(&mut canvas, 25.0, 30.0);

    let scene = canvas.scene();
    assert_eq!(scene.shapes[0].rect, ScreenRect::new(15.0, 20.0, 50.0, 50.0));
    assert!(scene.shapes[0].selected);
    assert_eq!(scene.handles.owner, Some(scene.shapes[0].id));
}

#[test]
fn test_hit_top_most_shape_wins() {
    let canvas = two_box_canvas();
    let scene = canvas.scene();
    let b = scene.shapes[1].id;
    assert_eq!(hit_test(&scene, Point::new(50.0, 50.0)), HitTarget::Shape(b));
}

#[test]
fn test_hit_background() {
    let canvas = two_box_canvas();
    let scene = canvas.scene();
    assert_eq!(hit_test(&scene, Point::new(5.0, 95.0)), HitTarget::Background);
}

#[test]
fn test_hidden_shape_not_hittable() {
    let mut canvas = two_box_canvas();
    canvas.set_threshold(0.5);
    let scene = canvas.scene();
    assert_eq!(hit_test(&scene, Point::new(80.0, 80.0)), HitTarget::Background);
}

#[test]
fn test_handle_wins_over_shape() {
    let mut canvas = two_box_canvas();
    click(&mut canvas, 20.0, 20.0);
    let scene = canvas.scene();
    assert_eq!(
        hit_test(&scene, Point::new(60.0, 60.0)),
        HitTarget::Handle(HandleRole::BottomRight)
    );
}

#[test]
fn test_delete_selected_clears_handles() {
    let mut canvas = two_box_canvas();
    click(&mut canvas, 20.0, 20.0);
    let removed = canvas.delete_selected();
    assert!(removed.is_some());

    let scene = canvas.scene();
    assert!(scene.handles.is_empty());
    assert_eq!(scene.shapes.len(), 1);
    assert_eq!(scene.shapes[0].label, "B");
    assert!(canvas.delete_selected().is_none());
}
